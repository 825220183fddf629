//! repo-pilot: Interactive CLI assistant with repository context ingestion
//!
//! This tool runs a conversational session against a language model, feeds it
//! local source files as context on demand, and applies the file creations
//! and edits the model proposes.

use anyhow::Result;

fn main() -> Result<()> {
    repo_pilot::cli::run()
}
