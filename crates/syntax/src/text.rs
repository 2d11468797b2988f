use crate::error::Result;
use std::fs;
use std::path::Path;

/// Decode bytes as UTF-8, dropping any invalid sequences instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Read a file as best-effort text.
pub fn try_read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(decode_lossy(&bytes))
}

/// Read a file as best-effort text; unreadable files yield an empty string.
pub fn read_text(path: &Path) -> String {
    match try_read_text(path) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("Unable to read {}: {e}", path.display());
            String::new()
        }
    }
}

/// Read a file only when it exists as a regular file.
pub fn read_text_if_exists(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    Some(read_text(path))
}
