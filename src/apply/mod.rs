//! Filesystem mutation: full-file writes and exact-snippet edits.
//!
//! Edits are transactional at the file level: the snippet is located before
//! any write, and a failed lookup leaves the file byte-identical. Only the
//! first (leftmost) occurrence is replaced, byte-for-byte with no regex and
//! no whitespace normalization, so an ambiguous or stale snippet fails
//! loudly instead of guessing intent.

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Write `content` verbatim to `path`, creating any missing parent
/// directories and overwriting an existing file without backup.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Replace the first occurrence of `original` in the file at `path` with
/// `replacement`.
///
/// Fails with [`Error::FileNotFound`] if the file does not exist and
/// [`Error::SnippetNotFound`] if `original` is empty or does not occur
/// verbatim, in both cases without writing anything. An empty `original`
/// would trivially match at offset zero and silently prepend, so it is
/// rejected outright.
pub fn apply_edit(path: &Path, original: &str, replacement: &str) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::FileNotFound(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    if original.is_empty() || !content.contains(original) {
        return Err(Error::SnippetNotFound(path.to_path_buf()));
    }

    let updated = content.replacen(original, replacement, 1);
    write_file(path, &updated)
}
