//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config;
use crate::domain::SkipReason;
use crate::history::ConversationHistory;
use crate::ingest::{DirectoryIngestor, PathFilter};
use crate::render;

#[derive(Args)]
pub struct InfoArgs {
    /// Local directory path to preview
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Config file to use instead of auto-discovery
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip files larger than this (bytes)
    #[arg(long, value_name = "BYTES")]
    pub max_file_bytes: Option<u64>,

    /// Stop after accepting this many files
    #[arg(long, value_name = "COUNT")]
    pub max_files: Option<usize>,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let root = args.path.canonicalize()?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let mut settings = config::load_settings(&root, args.config.as_deref())?;
    if let Some(bytes) = args.max_file_bytes {
        settings.max_file_bytes = bytes;
    }
    if let Some(count) = args.max_files {
        settings.max_files = count;
    }

    let mut filter = PathFilter::new(settings.max_file_bytes);
    if let Some(globs) = settings.exclude_globset()? {
        filter = filter.with_extra_excludes(globs);
    }

    // Dry run against a scratch history; only the report is shown.
    let mut scratch = ConversationHistory::new();
    let report =
        DirectoryIngestor::new(&mut scratch, settings.limits()).with_filter(filter).ingest(&root);

    render::print_ingestion_report(&root, &report);

    println!("Statistics:");
    println!("  Files added: {}", report.added.len());
    println!("  Files skipped: {}", report.skipped.len());
    for reason in [
        SkipReason::Denylisted,
        SkipReason::Hidden,
        SkipReason::ExcludedExtension,
        SkipReason::Oversize,
        SkipReason::Binary,
        SkipReason::ReadError,
    ] {
        println!("  Skipped ({}): {}", reason, report.skipped_with(reason));
    }
    println!("  Walk truncated: {}", report.truncated);

    Ok(())
}
