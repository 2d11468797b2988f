use crate::assembler::GraphAssembler;
use crate::error::Result;
use crate::graph::ReachabilityGraph;
use crate::matcher::{IncludeMatches, NameMatcher};
use crate::types::{BaseFiles, Report};
use legacy_rules_scanner::{resolve_include, FileScanner, RuleTarget, ScanOptions};
use legacy_rules_syntax::{
    parse_includes_file, DispatchParser, LoadManifestParser, MetadataParser, RuleFileMeta,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one inspection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectOptions {
    /// Rule file walk settings
    pub scan: ScanOptions,

    /// Include manifest file name, relative to the root
    pub includes_file: String,

    /// Load manifest file name, relative to the root
    pub load_file: String,

    /// Dispatch file name, relative to the root
    pub dispatch_file: String,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            includes_file: "base.includes".to_string(),
            load_file: "base.load".to_string(),
            dispatch_file: "base.rules".to_string(),
        }
    }
}

/// Read-only static analysis of a rule root
pub struct RulesInspector {
    options: InspectOptions,
    load_parser: LoadManifestParser,
    dispatch_parser: DispatchParser,
    metadata_parser: MetadataParser,
}

impl RulesInspector {
    pub fn new(options: InspectOptions) -> Result<Self> {
        Ok(Self {
            options,
            load_parser: LoadManifestParser::new()?,
            dispatch_parser: DispatchParser::new()?,
            metadata_parser: MetadataParser::new()?,
        })
    }

    /// Inspect a target produced by [`RuleTarget::from_path`]
    pub fn inspect(&self, target: &RuleTarget) -> Report {
        let root = target.root.as_path();
        let includes_path = root.join(&self.options.includes_file);
        let load_path = root.join(&self.options.load_file);
        let dispatch_path = root.join(&self.options.dispatch_file);

        let includes = parse_includes_file(&includes_path);
        let load_calls = self.load_parser.parse_file(&load_path);
        let dispatch_rules = self.dispatch_parser.parse_file(&dispatch_path);

        let rule_paths = FileScanner::rule_files(target, &self.options.scan);
        let rule_metadata: Vec<RuleFileMeta> = rule_paths
            .iter()
            .map(|path| self.metadata_parser.parse_file(path))
            .collect();
        let rule_files: Vec<String> = rule_metadata.iter().map(|m| m.path.clone()).collect();

        let include_resolutions = includes
            .iter()
            .map(|entry| resolve_include(root, &entry.name, &entry.path))
            .collect::<Vec<_>>();

        let matcher = NameMatcher::new(&rule_metadata);
        let include_names = includes.iter().map(|entry| entry.name.as_str());
        let dispatched = dispatch_rules
            .iter()
            .flat_map(|rule| rule.functions.iter().map(String::as_str));
        let matches = IncludeMatches::build(&matcher, include_names.chain(dispatched));

        let assembler = GraphAssembler::new(&includes, &dispatch_rules, &rule_files, &matches);
        let traversal_order = assembler.traversal_order();
        let traversal_graph = assembler.edges();
        let missing = assembler.missing(&matcher, &load_calls, &include_resolutions);

        // base.rules carries the rule extension but is the dispatch table, not a target
        let base_paths = [&includes_path, &load_path, &dispatch_path].map(|p| display(p));
        let reachability = ReachabilityGraph::build(&traversal_graph, &rule_files);
        let unreached_rule_files: Vec<String> = reachability
            .unreached_files()
            .into_iter()
            .filter(|file| !base_paths.contains(file))
            .collect();

        log::info!(
            "Inspected {}: {} rule files, {} includes, {} dispatch rules, {} edges ({:?})",
            root.display(),
            rule_files.len(),
            includes.len(),
            dispatch_rules.len(),
            traversal_graph.len(),
            assembler.source()
        );

        Report {
            root: display(root),
            base: BaseFiles {
                includes: existing(&includes_path),
                load: existing(&load_path),
                rules: existing(&dispatch_path),
            },
            includes,
            include_resolutions,
            base_load_calls: load_calls,
            dispatch_rules,
            traversal_order,
            traversal_graph,
            rule_files,
            rule_metadata,
            include_matches: matches.into_inner(),
            missing,
            unreached_rule_files,
        }
    }
}

/// Inspect `root` (or only `single_file` within it) with the given options.
pub fn inspect_root(
    root: impl AsRef<Path>,
    single_file: Option<PathBuf>,
    options: InspectOptions,
) -> Result<Report> {
    let target = RuleTarget {
        root: root.as_ref().to_path_buf(),
        single_file,
    };
    Ok(RulesInspector::new(options)?.inspect(&target))
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn existing(path: &Path) -> Option<String> {
    path.exists().then(|| display(path))
}
