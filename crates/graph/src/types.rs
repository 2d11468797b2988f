use legacy_rules_scanner::IncludeResolution;
use legacy_rules_syntax::{DispatchRule, IncludeEntry, RuleFileMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Origin tag for include-driven edges
pub const INCLUDES_ORIGIN: &str = "includes";

/// Origin tag for edges of rule files found without any manifest
pub const STANDALONE_ORIGIN: &str = "standalone";

/// Origin tag for the `index`-th (1-based) dispatch rule
pub fn dispatch_origin(index: usize) -> String {
    format!("dispatch:{index}")
}

/// Edge from a dispatch/include origin to the files matched for a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalEdge {
    /// `dispatch:<n>`, `includes` or `standalone`
    pub from: String,

    /// Function or include name; `None` for standalone files
    pub function: Option<String>,

    /// Zero or more matched rule files
    pub to_files: Vec<String>,
}

/// One row of the traversal order (a dispatch rule with its position)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStep {
    pub index: usize,
    pub condition: String,
    pub functions: Vec<String>,
}

/// Locations of the three base files, `None` when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFiles {
    pub includes: Option<String>,
    pub load: Option<String>,
    pub rules: Option<String>,
}

/// Names referenced somewhere but not backed by any rule file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDefinitions {
    pub includes_without_definitions: Vec<String>,
    pub dispatch_without_definitions: Vec<String>,
    pub load_without_definitions: Vec<String>,
    pub unresolved_include_paths: Vec<String>,
    /// Subset of `unresolved_include_paths` pointing at Perl lookup tables (`.pl`/`.pm`)
    pub unresolved_lookup_files: Vec<String>,
}

/// Full result of one inspection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub root: String,
    pub base: BaseFiles,
    pub includes: Vec<IncludeEntry>,
    pub include_resolutions: Vec<IncludeResolution>,
    pub base_load_calls: Vec<String>,
    pub dispatch_rules: Vec<DispatchRule>,
    pub traversal_order: Vec<TraversalStep>,
    pub traversal_graph: Vec<TraversalEdge>,
    pub rule_files: Vec<String>,
    pub rule_metadata: Vec<RuleFileMeta>,
    /// Name -> candidate files; several candidates means the name is ambiguous
    pub include_matches: BTreeMap<String, Vec<String>>,
    pub missing: MissingDefinitions,
    pub unreached_rule_files: Vec<String>,
}

impl Report {
    /// Names that matched more than one rule file
    pub fn ambiguous_matches(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.include_matches
            .iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }
}
