//! Core data types: conversation entries, model proposals, ingestion reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Speaker of a conversation entry, serialized in the wire form the chat
/// completion API expects (`"system"` / `"user"` / `"assistant"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of the conversation log. Entries are append-only and replayed
/// verbatim as the model's prompt history each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: Role,
    pub content: String,
}

/// A full-file write proposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileToCreate {
    pub path: String,
    pub content: String,
}

/// A single exact-snippet substitution proposed by the model.
///
/// `original_snippet` must occur verbatim in the target file's current
/// content or the instruction is void; only the first occurrence is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileToEdit {
    pub path: String,
    pub original_snippet: String,
    pub new_snippet: String,
}

/// The model's structured output for one turn: a reply plus optional file
/// operations. This is the trust boundary between the model and the
/// filesystem: every field is untrusted until it passes schema validation
/// in [`crate::proposal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantProposal {
    pub assistant_reply: String,
    #[serde(default)]
    pub files_to_create: Vec<FileToCreate>,
    #[serde(default)]
    pub files_to_edit: Vec<FileToEdit>,
}

/// Why a file was passed over during ingestion. Never fatal; skips are
/// accumulated into the [`IngestionReport`] and surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Denylisted,
    Hidden,
    ExcludedExtension,
    Oversize,
    Binary,
    ReadError,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::Denylisted => "denylisted",
            SkipReason::Hidden => "hidden",
            SkipReason::ExcludedExtension => "excluded extension",
            SkipReason::Oversize => "oversize",
            SkipReason::Binary => "binary",
            SkipReason::ReadError => "read error",
        };
        f.write_str(label)
    }
}

/// Outcome of one directory ingestion call. Purely observational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionReport {
    /// Files whose content was appended to the conversation, in walk order.
    pub added: Vec<PathBuf>,
    /// Files that were visited but not ingested, with the reason.
    pub skipped: Vec<(PathBuf, SkipReason)>,
    /// True when the walk halted early at the accepted-file ceiling. A
    /// documented degradation for very large trees, not an error.
    pub truncated: bool,
}

impl IngestionReport {
    /// Count of skipped files with the given reason.
    pub fn skipped_with(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|(_, r)| *r == reason).count()
    }
}

/// Resource ceilings for directory ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    /// Files larger than this many bytes are skipped as oversize.
    pub max_file_bytes: u64,
    /// The walk halts once this many files have been accepted.
    pub max_files: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self { max_file_bytes: 5_000_000, max_files: 1000 }
    }
}
