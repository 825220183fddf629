//! Terminal feedback: styled status lines, ingestion reports, edit previews.

use crate::domain::{FileToEdit, IngestionReport};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

pub fn banner() {
    println!("{}", style("repo-pilot: chat with your codebase").blue().bold());
    println!(
        "Use '{}' to include files in the conversation:\n  \
         • '{}' for a single file\n  \
         • '{}' for all files in a folder\n\
         Type '{}' or '{}' to end.\n",
        style("/add").magenta().bold(),
        style("/add path/to/file").magenta(),
        style("/add path/to/folder").magenta(),
        style("exit").red().bold(),
        style("quit").red().bold(),
    );
}

pub fn success(msg: impl Display) {
    println!("{} {}", style("✓").green(), msg);
}

pub fn info(msg: impl Display) {
    println!("{} {}", style("ℹ").blue(), msg);
}

pub fn warn(msg: impl Display) {
    println!("{} {}", style("⚠").yellow(), msg);
}

pub fn error(msg: impl Display) {
    println!("{} {}", style("✗").red(), msg);
}

/// List every accepted and skipped path from one directory ingestion.
pub fn print_ingestion_report(root: &Path, report: &IngestionReport) {
    success(format!("Added folder '{}' to the conversation.", style(root.display()).cyan()));
    if report.truncated {
        warn("Reached the maximum file limit; the folder was only partially ingested.");
    }

    if !report.added.is_empty() {
        println!("\n{} ({})", style("Added files:").bold(), report.added.len());
        for path in &report.added {
            println!("  {}", style(path.display()).cyan());
        }
    }

    if !report.skipped.is_empty() {
        println!("\n{} ({})", style("Skipped files:").yellow(), report.skipped.len());
        for (path, reason) in &report.skipped {
            println!("  {} ({})", style(path.display()).yellow(), reason);
        }
    }
    println!();
}

/// Show proposed edits before the confirmation gate, diff-style with long
/// snippets elided.
pub fn print_edit_preview(edits: &[FileToEdit]) {
    println!("\n{}", style("Proposed edits:").bold());
    for (i, edit) in edits.iter().enumerate() {
        println!("  {}. {}", i + 1, style(&edit.path).cyan());
        println!("     - {}", style(elide(&edit.original_snippet, 60)).red());
        println!("     + {}", style(elide(&edit.new_snippet, 60)).green());
    }
    println!();
}

/// Spinner shown while a directory walk is in progress.
pub fn scan_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Flatten to one line and cap the length for preview display.
fn elide(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', "\\n");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut out: String = flat.chars().take(max_chars).collect();
    out.push('…');
    out
}
