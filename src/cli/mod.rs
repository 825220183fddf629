//! Command-line interface for repo-pilot
//!
//! Provides the interactive `chat` session plus `info` and `completions`
//! subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chat;
mod completions;
mod info;

/// Chat with a language model about your repository and apply its edits
#[derive(Parser)]
#[command(name = "repo-pilot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive assistant session
    Chat(chat::ChatArgs),

    /// Preview what a directory ingestion would add, without a session
    Info(info::InfoArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Chat(args) => chat::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Completions(args) => completions::run(&args),
    }
}
