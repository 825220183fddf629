//! Binary detection and file reading with UTF-8 fallback logic.
//!
//! Ingested files are read as text with a strict UTF-8 fast path and a
//! detection-based fallback, so source files in legacy encodings still become
//! usable context instead of read errors.

use crate::error::Result;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes are sampled for the binary sniff.
pub const BINARY_SNIFF_LEN: usize = 1024;

const DETECT_SAMPLE_SIZE: usize = 8192;

/// Detect if a file is binary (not text).
///
/// A NUL byte within the first [`BINARY_SNIFF_LEN`] bytes marks the file as
/// binary. Any I/O error while sampling is treated as binary; sampling never
/// propagates a failure.
pub fn is_binary_file(path: &Path) -> bool {
    sniff_for_nul(path).unwrap_or(true)
}

fn sniff_for_nul(path: &Path) -> std::io::Result<bool> {
    let mut file = File::open(path)?;
    let mut sample = [0u8; BINARY_SNIFF_LEN];
    let bytes_read = file.read(&mut sample)?;
    Ok(sample[..bytes_read].contains(&0))
}

/// Read a file as text.
///
/// Strategy:
/// 1. Try strict UTF-8 (fast path for most source files)
/// 2. Honor a BOM if one is present (most reliable signal)
/// 3. Fall back to chardetng detection and decode with replacement
pub fn read_file_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    if let Ok(text) = std::str::from_utf8(&bytes) {
        return Ok(text.to_string());
    }

    let encoding = match Encoding::for_bom(&bytes) {
        Some((encoding, _)) => encoding,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(&bytes[..bytes.len().min(DETECT_SAMPLE_SIZE)], true);
            detector.guess(None, true)
        }
    };

    let (decoded, _, _) = encoding.decode(&bytes);
    Ok(decoded.into_owned())
}
