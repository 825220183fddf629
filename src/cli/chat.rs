//! Interactive assistant session.
//!
//! One user turn at a time, strictly sequential: read a line, route it
//! (`/add`, exit, or a model turn), and report every recoverable failure
//! without leaving the loop. Creates are applied unconditionally; edits only
//! after an explicit confirmation.

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use globset::GlobSet;
use std::path::{Path, PathBuf};

use crate::apply;
use crate::config::{self, Settings};
use crate::domain::{FileToCreate, FileToEdit, Role};
use crate::error::Error;
use crate::history::ConversationHistory;
use crate::ingest::{self, AddTarget, DirectoryIngestor, PathFilter};
use crate::llm::{ChatClient, SYSTEM_PROMPT};
use crate::proposal;
use crate::render;

#[derive(Args)]
pub struct ChatArgs {
    /// Config file to use instead of auto-discovery
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured model identifier
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Override the configured API base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
}

pub fn run(args: ChatArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut settings = config::load_settings(&cwd, args.config.as_deref())?;
    if let Some(model) = args.model {
        settings.model = model;
    }
    if let Some(base) = args.api_base {
        settings.api_base = base;
    }

    // The only fatal condition; everything past here recovers into the loop.
    let api_key = config::api_key().with_context(|| {
        format!(
            "no API key found; set {} or {}",
            config::ENV_API_KEY,
            config::ENV_API_KEY_FALLBACK
        )
    })?;

    let extra_excludes = settings.exclude_globset()?;
    let client =
        ChatClient::new(&settings.api_base, &settings.model, api_key, settings.request_timeout_secs);
    let mut history = ConversationHistory::with_system_prompt(SYSTEM_PROMPT);

    render::banner();

    loop {
        let line: String = match Input::with_theme(&ColorfulTheme::default())
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // EOF or interrupt ends the session cleanly.
            Err(_) => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if input == "/add" || input.starts_with("/add ") {
            let arg = input.strip_prefix("/add").unwrap_or_default().trim();
            handle_add(arg, &mut history, &settings, extra_excludes.as_ref());
            continue;
        }

        run_turn(&client, &mut history, input);
    }

    render::info("Session finished.");
    Ok(())
}

/// Route an `/add` argument to single-file or directory ingestion.
fn handle_add(
    arg: &str,
    history: &mut ConversationHistory,
    settings: &Settings,
    extra_excludes: Option<&GlobSet>,
) {
    if arg.is_empty() {
        render::warn("Usage: /add <path>");
        return;
    }

    match ingest::resolve_add_target(arg) {
        Ok(AddTarget::Directory(dir)) => {
            let spinner = render::scan_spinner("Scanning directory...");
            let mut filter = PathFilter::new(settings.max_file_bytes);
            if let Some(globs) = extra_excludes {
                filter = filter.with_extra_excludes(globs.clone());
            }
            let report = DirectoryIngestor::new(history, settings.limits())
                .with_filter(filter)
                .ingest(&dir);
            spinner.finish_and_clear();
            render::print_ingestion_report(&dir, &report);
        }
        Ok(AddTarget::File(file)) => match ingest::ingest_file(history, &file) {
            Ok(()) => {
                render::success(format!("Added file '{}' to the conversation.", file.display()));
            }
            Err(e) => render::error(format!("Could not add file '{}': {e}", file.display())),
        },
        Err(e) => render::error(format!("Could not add path '{arg}': {e}")),
    }
}

/// One model turn: append the user entry, call the model, interpret the
/// proposal, and apply its instructions.
fn run_turn(client: &ChatClient, history: &mut ConversationHistory, input: &str) {
    history.push(Role::User, input.to_string());

    let raw = match client.complete(history.entries()) {
        Ok(raw) => raw,
        // The user turn stays in history; the next turn replays it.
        Err(e) => {
            render::error(e);
            return;
        }
    };

    match proposal::interpret(&raw) {
        Ok(p) => {
            history.push(Role::Assistant, p.assistant_reply.clone());
            println!("\n{}\n", p.assistant_reply);
            apply_creates(&p.files_to_create);
            confirm_and_apply_edits(&p.files_to_edit);
        }
        Err(Error::Schema { reason, raw }) => {
            // Surface the reply if it was itself parseable; either way no
            // instruction from the payload is applied.
            if let Some(reply) = proposal::reply_text(&raw) {
                println!("\n{reply}\n");
                render::warn(format!(
                    "The response carried malformed file instructions ({reason}); none were applied."
                ));
            } else {
                render::error(format!("Could not interpret the model response: {reason}"));
                println!("{raw}");
            }
        }
        Err(e) => render::error(e),
    }
}

/// Creates are additive and applied without confirmation.
fn apply_creates(creates: &[FileToCreate]) {
    for create in creates {
        match apply::write_file(Path::new(&create.path), &create.content) {
            Ok(()) => render::success(format!("Created/updated file at '{}'", create.path)),
            Err(e) => render::error(format!("Could not write '{}': {e}", create.path)),
        }
    }
}

/// Edits are destructive replacements and gate on explicit confirmation.
/// Instructions apply independently: one failure never blocks the rest.
fn confirm_and_apply_edits(edits: &[FileToEdit]) {
    if edits.is_empty() {
        return;
    }

    render::print_edit_preview(edits);

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Apply these edits?")
        .default(false)
        .interact()
        .unwrap_or(false);

    if !confirmed {
        render::info("Skipped applying edits.");
        return;
    }

    for edit in edits {
        match apply::apply_edit(Path::new(&edit.path), &edit.original_snippet, &edit.new_snippet) {
            Ok(()) => render::success(format!("Applied edit to '{}'", edit.path)),
            Err(e @ Error::SnippetNotFound(_)) => {
                render::warn(format!("{e}. No changes made."));
            }
            Err(e) => render::error(e),
        }
    }
}
