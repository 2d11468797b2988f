use serde::{Deserialize, Serialize};

/// One `name,path` line of the include manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncludeEntry {
    /// Free-form identifier used for name matching
    pub name: String,

    /// Author-supplied file reference, possibly relative to the rule root
    pub path: String,
}

impl IncludeEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// One conditional branch of the dispatch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRule {
    /// Raw guard expression text, never evaluated
    pub condition: String,

    /// Functions invoked inside the branch, in source order (repeats kept)
    pub functions: Vec<String>,
}

/// Metadata scraped from a single rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFileMeta {
    /// Rule file path as discovered
    pub path: String,

    /// Display name from a leading `# Name:` comment
    pub declared_name: Option<String>,

    /// Internal label from a `$rulesfile = "..."` assignment
    pub rulesfile_label: Option<String>,
}
