use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::paths::normalize_display;

/// How an include path was (or was not) resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Declared path was empty
    Empty,
    /// Absolute path that exists
    Absolute,
    /// Root-relative path that exists
    Relative,
    /// Path (absolute or relative) that does not exist
    Unresolved,
}

impl MatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Absolute => "absolute",
            Self::Relative => "relative",
            Self::Unresolved => "unresolved",
        }
    }
}

/// Outcome of resolving one include entry against the filesystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeResolution {
    pub name: String,
    pub original_path: String,
    /// Normalized, `/`-separated; set only when `exists`
    pub resolved_path: Option<String>,
    pub exists: bool,
    pub match_kind: MatchKind,
}

/// Resolve a declared include path, relative paths being joined onto `root`.
pub fn resolve_include_path(root: &Path, include_path: &str) -> (Option<String>, bool, MatchKind) {
    if include_path.is_empty() {
        return (None, false, MatchKind::Empty);
    }

    let declared = Path::new(include_path);
    let (candidate, kind) = if declared.is_absolute() {
        (declared.to_path_buf(), MatchKind::Absolute)
    } else {
        (root.join(declared), MatchKind::Relative)
    };

    if candidate.exists() {
        (Some(normalize_display(&candidate)), true, kind)
    } else {
        (None, false, MatchKind::Unresolved)
    }
}

/// Resolve one named include into a full resolution record.
pub fn resolve_include(root: &Path, name: &str, include_path: &str) -> IncludeResolution {
    let (resolved_path, exists, match_kind) = resolve_include_path(root, include_path);
    log::debug!(
        "Include {name} -> {include_path}: {} ({})",
        match_kind.as_str(),
        resolved_path.as_deref().unwrap_or("-")
    );
    IncludeResolution {
        name: name.to_string(),
        original_path: include_path.to_string(),
        resolved_path,
        exists,
        match_kind,
    }
}
