//! Path eligibility rules for ingestion.
//!
//! Rules are applied in order, first match wins: name denylist, hidden,
//! extension denylist, size ceiling, binary sniff. The name denylist also
//! prunes whole subtrees during traversal.

use crate::domain::SkipReason;
use crate::utils::encoding::is_binary_file;
use globset::GlobSet;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

/// Directory and file names excluded from ingestion regardless of content:
/// build output, VCS metadata, lockfiles, caches, environment files.
static EXCLUDED_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        ".DS_Store",
        "Thumbs.db",
        ".gitignore",
        ".python-version",
        "uv.lock",
        ".uv",
        "uvenv",
        ".uvenv",
        ".venv",
        "venv",
        "__pycache__",
        ".pytest_cache",
        ".coverage",
        ".mypy_cache",
        "node_modules",
        "package-lock.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        ".next",
        ".nuxt",
        "dist",
        "build",
        ".cache",
        ".parcel-cache",
        ".turbo",
        ".vercel",
        ".output",
        ".contentlayer",
        "out",
        "coverage",
        ".nyc_output",
        "storybook-static",
        ".env",
        ".env.local",
        ".env.development",
        ".env.production",
        ".git",
        ".svn",
        ".hg",
        "CVS",
    ])
});

/// Filename suffixes excluded as binary or asset content: images, archives,
/// compiled artifacts, fonts, minified bundles.
static EXCLUDED_SUFFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".png", ".jpg", ".jpeg", ".gif", ".ico", ".svg", ".webp", ".avif", ".mp4", ".webm",
        ".mov", ".mp3", ".wav", ".ogg", ".zip", ".tar", ".gz", ".7z", ".rar", ".exe", ".dll",
        ".so", ".dylib", ".bin", ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
        ".pyc", ".pyo", ".pyd", ".egg", ".whl", ".uv", ".uvenv", ".db", ".sqlite", ".sqlite3",
        ".log", ".idea", ".vscode", ".map", ".chunk.js", ".chunk.css", ".min.js", ".min.css",
        ".bundle.js", ".bundle.css", ".cache", ".tmp", ".temp", ".ttf", ".otf", ".woff",
        ".woff2", ".eot",
    ]
});

/// Per-file eligibility checks, applied during traversal after directory
/// pruning.
#[derive(Debug, Clone)]
pub struct PathFilter {
    max_file_bytes: u64,
    extra_excludes: Option<GlobSet>,
}

impl PathFilter {
    /// Create a filter with the given size ceiling.
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes, extra_excludes: None }
    }

    /// Add user-configured exclusion globs on top of the fixed denylist.
    pub fn with_extra_excludes(mut self, globs: GlobSet) -> Self {
        self.extra_excludes = Some(globs);
        self
    }

    /// Whether a directory name should be pruned before descent. Pruned
    /// subtrees are never opened, so excluded trees such as dependency or
    /// build directories cost no I/O. The traversal root is exempt.
    pub fn should_prune_dir(name: &str) -> bool {
        EXCLUDED_NAMES.contains(name) || name.starts_with('.')
    }

    /// Apply the full rule chain to one file. `size` comes from the caller's
    /// directory-entry metadata so the file is not opened unless the binary
    /// sniff is reached.
    pub fn check_file(&self, path: &Path, size: u64) -> Result<(), SkipReason> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if EXCLUDED_NAMES.contains(name) {
            return Err(SkipReason::Denylisted);
        }

        if let Some(globs) = &self.extra_excludes {
            if globs.is_match(path) {
                return Err(SkipReason::Denylisted);
            }
        }

        if name.starts_with('.') {
            return Err(SkipReason::Hidden);
        }

        let name_lower = name.to_lowercase();
        if EXCLUDED_SUFFIXES.iter().any(|suffix| name_lower.ends_with(suffix)) {
            return Err(SkipReason::ExcludedExtension);
        }

        if size > self.max_file_bytes {
            return Err(SkipReason::Oversize);
        }

        if is_binary_file(path) {
            return Err(SkipReason::Binary);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn prunes_denylisted_and_hidden_dirs() {
        assert!(PathFilter::should_prune_dir("node_modules"));
        assert!(PathFilter::should_prune_dir(".git"));
        assert!(PathFilter::should_prune_dir(".cache"));
        assert!(PathFilter::should_prune_dir(".anything-hidden"));
        assert!(!PathFilter::should_prune_dir("src"));
        assert!(!PathFilter::should_prune_dir("tests"));
    }

    #[test]
    fn rejects_denylisted_names() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "yarn.lock", b"lockfile");
        let filter = PathFilter::new(5_000_000);
        assert_eq!(filter.check_file(&path, 8), Err(SkipReason::Denylisted));
    }

    #[test]
    fn rejects_hidden_files() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, ".secret", b"x");
        let filter = PathFilter::new(5_000_000);
        assert_eq!(filter.check_file(&path, 1), Err(SkipReason::Hidden));
    }

    #[test]
    fn rejects_excluded_extensions_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let filter = PathFilter::new(5_000_000);

        let png = write_file(&dir, "logo.PNG", b"not really a png");
        assert_eq!(filter.check_file(&png, 16), Err(SkipReason::ExcludedExtension));

        let minified = write_file(&dir, "app.min.js", b"var a=1;");
        assert_eq!(filter.check_file(&minified, 8), Err(SkipReason::ExcludedExtension));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "big.txt", b"payload");
        let filter = PathFilter::new(100);

        // Exactly at the ceiling: accepted past the size rule.
        assert_eq!(filter.check_file(&path, 100), Ok(()));
        // One byte over: skipped as oversize.
        assert_eq!(filter.check_file(&path, 101), Err(SkipReason::Oversize));
    }

    #[test]
    fn rejects_binary_content() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "blob.dat", &[0x7f, 0x45, 0x00, 0x46]);
        let filter = PathFilter::new(5_000_000);
        assert_eq!(filter.check_file(&path, 4), Err(SkipReason::Binary));
    }

    #[test]
    fn accepts_ordinary_source_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "main.rs", b"fn main() {}\n");
        let filter = PathFilter::new(5_000_000);
        assert_eq!(filter.check_file(&path, 13), Ok(()));
    }

    #[test]
    fn denylist_outranks_extension_rule() {
        // package-lock.json would pass the suffix rule but is denylisted by name.
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "package-lock.json", b"{}");
        let filter = PathFilter::new(5_000_000);
        assert_eq!(filter.check_file(&path, 2), Err(SkipReason::Denylisted));
    }

    #[test]
    fn extra_excludes_apply_as_denylist() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "generated.rs", b"fn gen() {}");

        let mut builder = globset::GlobSetBuilder::new();
        builder.add(globset::Glob::new("**/generated.rs").unwrap());
        let filter = PathFilter::new(5_000_000).with_extra_excludes(builder.build().unwrap());

        assert_eq!(filter.check_file(&path, 11), Err(SkipReason::Denylisted));
    }
}
