//! Shared helpers: path validation and encoding-aware file reading.

pub mod encoding;
pub mod paths;

pub use encoding::{is_binary_file, read_file_text};
pub use paths::validate_user_path;
