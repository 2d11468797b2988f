use crate::error::Result;
use crate::text::read_text_if_exists;
use crate::types::IncludeEntry;
use regex::Regex;
use std::path::Path;

/// Parse include manifest text into entries, in file order.
///
/// Each non-blank, non-comment line is split on its first comma. Lines without a comma,
/// or with an empty side after trimming, are dropped. Duplicate names are kept.
pub fn parse_includes_str(content: &str) -> Vec<IncludeEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (name, path) = line.split_once(',')?;
            let (name, path) = (name.trim(), path.trim());
            if name.is_empty() || path.is_empty() {
                return None;
            }
            Some(IncludeEntry::new(name, path))
        })
        .collect()
}

/// Parse an include manifest file; a missing file has no entries.
pub fn parse_includes_file(path: &Path) -> Vec<IncludeEntry> {
    let Some(content) = read_text_if_exists(path) else {
        log::debug!("No include manifest at {}", path.display());
        return Vec::new();
    };
    let entries = parse_includes_str(&content);
    log::debug!("Parsed {} include entries from {}", entries.len(), path.display());
    entries
}

/// Parser for the load manifest (`fn();` per line)
pub struct LoadManifestParser {
    call: Regex,
}

impl LoadManifestParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            call: Regex::new(r"^\s*([A-Za-z0-9_]+)\s*\(\s*\)\s*;\s*$")?,
        })
    }

    /// Extract invoked function names, preserving order and duplicates.
    pub fn parse_str(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .filter_map(|line| self.call.captures(line))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Parse a load manifest file; a missing file has no calls.
    pub fn parse_file(&self, path: &Path) -> Vec<String> {
        match read_text_if_exists(path) {
            Some(content) => self.parse_str(&content),
            None => {
                log::debug!("No load manifest at {}", path.display());
                Vec::new()
            }
        }
    }
}
