//! Directory tree walk with pruning, per-file filtering, and a global
//! accepted-file ceiling.

use crate::domain::{IngestLimits, IngestionReport, Role, SkipReason};
use crate::history::ConversationHistory;
use crate::ingest::filter::PathFilter;
use crate::utils::encoding::read_file_text;
use ignore::WalkBuilder;
use std::path::Path;

/// Walks a directory tree and appends accepted file contents to the
/// conversation, reporting every accepted and skipped path.
pub struct DirectoryIngestor<'a> {
    filter: PathFilter,
    max_files: usize,
    history: &'a mut ConversationHistory,
}

impl<'a> DirectoryIngestor<'a> {
    pub fn new(history: &'a mut ConversationHistory, limits: IngestLimits) -> Self {
        Self { filter: PathFilter::new(limits.max_file_bytes), max_files: limits.max_files, history }
    }

    /// Replace the default filter, e.g. to add configured exclusion globs.
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Walk `root`, ingest every eligible file, and report the outcome.
    ///
    /// Denylisted and hidden directories are pruned before descent and never
    /// opened. Once the accepted-file ceiling is reached the walk halts early
    /// and the report is marked truncated. Read failures demote a file to
    /// skipped rather than aborting the walk.
    pub fn ingest(&mut self, root: &Path) -> IngestionReport {
        let mut report = IngestionReport::default();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| {
                if entry.file_type().map_or(false, |t| t.is_dir()) {
                    if let Some(name) = entry.file_name().to_str() {
                        return !PathFilter::should_prune_dir(name);
                    }
                }
                true
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(_) => continue,
            };

            if entry.file_type().map_or(true, |t| t.is_dir()) {
                continue;
            }

            if report.added.len() >= self.max_files {
                tracing::warn!(
                    limit = self.max_files,
                    "reached maximum file limit, halting directory walk"
                );
                report.truncated = true;
                break;
            }

            let path = entry.path();
            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(_) => {
                    report.skipped.push((path.to_path_buf(), SkipReason::ReadError));
                    continue;
                }
            };

            if let Err(reason) = self.filter.check_file(path, size) {
                tracing::debug!(path = %path.display(), %reason, "skipping file");
                report.skipped.push((path.to_path_buf(), reason));
                continue;
            }

            match read_file_text(path) {
                Ok(content) => {
                    self.history.push(Role::System, format_file_entry(path, &content));
                    report.added.push(path.to_path_buf());
                }
                Err(_) => {
                    report.skipped.push((path.to_path_buf(), SkipReason::ReadError));
                }
            }
        }

        report
    }
}

/// The conversation entry form for one ingested file: path header, blank
/// line, verbatim content. The entry holds a copy, not a live reference;
/// later edits on disk do not retroactively update history.
pub fn format_file_entry(path: &Path, content: &str) -> String {
    format!("Content of file '{}':\n\n{}", path.display(), content)
}
