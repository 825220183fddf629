//! Error taxonomy shared across the ingestion and mutation engines.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the context-ingestion and edit-application engine.
///
/// Filtering decisions during directory ingestion are not errors; they travel
/// through [`crate::domain::SkipReason`] inside the ingestion report instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The user-supplied path still contains a parent-directory reference
    /// after being made absolute.
    #[error("invalid path '{0}': contains parent directory references")]
    InvalidPath(String),

    /// An edit targeted a file that does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// An edit's original snippet does not occur in the target file.
    #[error("snippet not found in {}", .0.display())]
    SnippetNotFound(PathBuf),

    /// The model's payload does not match the proposal schema.
    /// The raw payload is kept for user inspection.
    #[error("malformed model response: {reason}")]
    Schema { reason: String, raw: String },

    /// The model call failed at the transport or HTTP level.
    #[error("model request failed: {0}")]
    Transport(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a schema error, preserving the raw payload.
    pub fn schema(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Schema { reason: reason.into(), raw: raw.into() }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
