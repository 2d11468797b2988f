use crate::matcher::{IncludeMatches, NameMatcher};
use crate::types::{
    dispatch_origin, MissingDefinitions, TraversalEdge, TraversalStep, INCLUDES_ORIGIN,
    STANDALONE_ORIGIN,
};
use legacy_rules_scanner::IncludeResolution;
use legacy_rules_syntax::{DispatchRule, IncludeEntry};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const LOOKUP_EXTENSIONS: [&str; 2] = ["pl", "pm"];

/// Which source drove the traversal graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalSource {
    Dispatch,
    Includes,
    Standalone,
    Empty,
}

/// Builds traversal edges and missing-definition sets from parsed inputs
pub struct GraphAssembler<'a> {
    includes: &'a [IncludeEntry],
    dispatch_rules: &'a [DispatchRule],
    rule_files: &'a [String],
    matches: &'a IncludeMatches,
}

impl<'a> GraphAssembler<'a> {
    pub fn new(
        includes: &'a [IncludeEntry],
        dispatch_rules: &'a [DispatchRule],
        rule_files: &'a [String],
        matches: &'a IncludeMatches,
    ) -> Self {
        Self {
            includes,
            dispatch_rules,
            rule_files,
            matches,
        }
    }

    /// Dispatch rules win over includes, which win over bare rule files.
    pub fn source(&self) -> TraversalSource {
        if !self.dispatch_rules.is_empty() {
            TraversalSource::Dispatch
        } else if !self.includes.is_empty() {
            TraversalSource::Includes
        } else if !self.rule_files.is_empty() {
            TraversalSource::Standalone
        } else {
            TraversalSource::Empty
        }
    }

    /// Edges from the highest-priority non-empty source only
    pub fn edges(&self) -> Vec<TraversalEdge> {
        match self.source() {
            TraversalSource::Dispatch => self
                .dispatch_rules
                .iter()
                .enumerate()
                .flat_map(|(idx, rule)| {
                    let from = dispatch_origin(idx + 1);
                    rule.functions.iter().map(move |function| TraversalEdge {
                        from: from.clone(),
                        function: Some(function.clone()),
                        to_files: self.matches.files(function).to_vec(),
                    })
                })
                .collect(),
            TraversalSource::Includes => self
                .includes
                .iter()
                .map(|entry| TraversalEdge {
                    from: INCLUDES_ORIGIN.to_string(),
                    function: Some(entry.name.clone()),
                    to_files: self.matches.files(&entry.name).to_vec(),
                })
                .collect(),
            TraversalSource::Standalone => self
                .rule_files
                .iter()
                .map(|path| TraversalEdge {
                    from: STANDALONE_ORIGIN.to_string(),
                    function: None,
                    to_files: vec![path.clone()],
                })
                .collect(),
            TraversalSource::Empty => Vec::new(),
        }
    }

    /// Dispatch rules in file order with 1-based indices
    pub fn traversal_order(&self) -> Vec<TraversalStep> {
        self.dispatch_rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| TraversalStep {
                index: idx + 1,
                condition: rule.condition.clone(),
                functions: rule.functions.clone(),
            })
            .collect()
    }

    /// Distinct dispatched function names, sorted
    pub fn dispatched_functions(&self) -> Vec<&'a str> {
        self.dispatch_rules
            .iter()
            .flat_map(|rule| rule.functions.iter())
            .filter(|name| !name.is_empty())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Referenced names without any rule file behind them
    pub fn missing(
        &self,
        matcher: &NameMatcher<'_>,
        load_calls: &[String],
        resolutions: &[IncludeResolution],
    ) -> MissingDefinitions {
        let includes_without_definitions = distinct(self.includes.iter().map(|e| e.name.as_str()))
            .into_iter()
            .filter(|name| !self.matches.contains(name))
            .collect();

        let dispatch_without_definitions = self
            .dispatched_functions()
            .into_iter()
            .filter(|name| !self.matches.contains(name))
            .map(str::to_string)
            .collect();

        let load_without_definitions = distinct(load_calls.iter().map(String::as_str))
            .into_iter()
            .filter(|name| !self.matches.contains(name) && matcher.candidates(name).is_empty())
            .collect();

        let unresolved_include_paths = distinct(
            resolutions
                .iter()
                .filter(|r| !r.exists)
                .map(|r| r.original_path.as_str()),
        );

        let unresolved_lookup_files = unresolved_include_paths
            .iter()
            .filter(|path| is_lookup_file(path))
            .cloned()
            .collect();

        MissingDefinitions {
            includes_without_definitions,
            dispatch_without_definitions,
            load_without_definitions,
            unresolved_include_paths,
            unresolved_lookup_files,
        }
    }
}

fn is_lookup_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            LOOKUP_EXTENSIONS
                .iter()
                .any(|lookup| ext.eq_ignore_ascii_case(lookup))
        })
}

/// First-seen order, duplicates dropped
fn distinct<'s>(items: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
