use crate::error::Result;
use crate::text::read_text;
use crate::types::RuleFileMeta;
use regex::Regex;
use std::path::Path;

/// Pattern search for the display name and internal label of a rule file.
///
/// This is not a structural parse: arbitrary surrounding content is tolerated and
/// only the first match of each pattern counts.
pub struct MetadataParser {
    declared_name: Regex,
    rulesfile_label: Regex,
}

impl MetadataParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            declared_name: Regex::new(r"(?m)^#\s*Name:\s*(.+)$")?,
            rulesfile_label: Regex::new(r#"\$rulesfile\s*=\s*"([^"]+)""#)?,
        })
    }

    /// Extract metadata from already loaded content
    pub fn parse_str(&self, path: impl Into<String>, content: &str) -> RuleFileMeta {
        RuleFileMeta {
            path: path.into(),
            declared_name: first_capture(&self.declared_name, content),
            rulesfile_label: first_capture(&self.rulesfile_label, content),
        }
    }

    /// Read a rule file and extract its metadata; unreadable files yield empty metadata
    pub fn parse_file(&self, path: &Path) -> RuleFileMeta {
        let content = read_text(path);
        let meta = self.parse_str(path.to_string_lossy(), &content);
        log::debug!(
            "Rule file {}: name={:?} label={:?}",
            path.display(),
            meta.declared_name,
            meta.rulesfile_label
        );
        meta
    }
}

fn first_capture(pattern: &Regex, content: &str) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
