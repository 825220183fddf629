//! Context ingestion: path filtering, directory walking, and single-file
//! reads into the conversation log.

pub mod filter;
pub mod walker;

pub use filter::PathFilter;
pub use walker::DirectoryIngestor;

use crate::domain::Role;
use crate::error::{Error, Result};
use crate::history::ConversationHistory;
use crate::utils::encoding::read_file_text;
use crate::utils::paths::validate_user_path;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where an `/add` request routes after path validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTarget {
    File(PathBuf),
    Directory(PathBuf),
}

/// Validate a user-supplied `/add` argument and decide how to ingest it.
///
/// Traversal attempts fail here with [`Error::InvalidPath`], before any
/// filesystem access and before the conversation is touched.
pub fn resolve_add_target(input: &str) -> Result<AddTarget> {
    let resolved = validate_user_path(input)?;
    if resolved.is_dir() {
        Ok(AddTarget::Directory(resolved))
    } else {
        Ok(AddTarget::File(resolved))
    }
}

/// Read one file and append its content to the conversation.
///
/// Single files named explicitly by the user bypass the eligibility rules;
/// only read failures are reported.
pub fn ingest_file(history: &mut ConversationHistory, path: &Path) -> Result<()> {
    let content = read_file_text(path).map_err(|e| match e {
        Error::Io(io) if io.kind() == ErrorKind::NotFound => {
            Error::FileNotFound(path.to_path_buf())
        }
        other => other,
    })?;
    history.push(Role::System, walker::format_file_entry(path, &content));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn traversal_attempt_is_rejected_before_any_ingestion() {
        let mut history = ConversationHistory::new();
        let before = history.len();

        let err = resolve_add_target("../../etc").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        // Nothing was routed, so the conversation is untouched.
        assert_eq!(history.len(), before);
    }

    #[test]
    fn routes_directories_and_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "hi").unwrap();

        let dir_target = resolve_add_target(temp.path().to_str().unwrap()).unwrap();
        assert_eq!(dir_target, AddTarget::Directory(temp.path().to_path_buf()));

        let file_target = resolve_add_target(file.to_str().unwrap()).unwrap();
        assert_eq!(file_target, AddTarget::File(file.clone()));
    }

    #[test]
    fn ingest_file_appends_one_system_entry() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("snippet.rs");
        fs::write(&file, "fn answer() -> u32 { 42 }\n").unwrap();

        let mut history = ConversationHistory::new();
        ingest_file(&mut history, &file).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].role, Role::System);
        assert!(history.entries()[0].content.contains("fn answer()"));
    }

    #[test]
    fn ingest_file_reports_missing_file() {
        let mut history = ConversationHistory::new();
        let err = ingest_file(&mut history, Path::new("/no/such/file.rs")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
        assert!(history.is_empty());
    }
}
