//! Path validation for user-supplied ingestion targets.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Resolve a user-supplied path to absolute form and reject traversal
/// attempts.
///
/// The check is purely lexical: the path is joined onto the current working
/// directory if relative, and if any component of the absolute form is a
/// parent-directory marker the operation fails with [`Error::InvalidPath`]
/// before the target is touched on disk.
pub fn validate_user_path(input: &str) -> Result<PathBuf> {
    let raw = Path::new(input);
    let absolute =
        if raw.is_absolute() { raw.to_path_buf() } else { std::env::current_dir()?.join(raw) };

    if absolute.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(Error::InvalidPath(input.to_string()));
    }

    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_parent_reference() {
        let err = validate_user_path("../outside").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn rejects_embedded_parent_reference() {
        let err = validate_user_path("/srv/app/../etc/passwd").unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn accepts_plain_relative_path() {
        let resolved = validate_user_path("src/lib.rs").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("src/lib.rs"));
    }

    #[test]
    fn accepts_absolute_path() {
        let resolved = validate_user_path("/tmp/project").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/project"));
    }

    #[test]
    fn validation_does_not_require_path_to_exist() {
        // The gate is lexical; existence is checked later by the caller.
        let resolved = validate_user_path("/definitely/not/present").unwrap();
        assert_eq!(resolved, PathBuf::from("/definitely/not/present"));
    }
}
