//! # Legacy Rules Graph
//!
//! Links what the manifests reference to the rule files that exist, and assembles the
//! traversal graph and report.
//!
//! ## Architecture
//!
//! ```text
//! IncludeEntry[] + DispatchRule[] + RuleFileMeta[]
//!     │
//!     ├──> Name Matcher
//!     │      ├─ substring of file name (case-insensitive)
//!     │      └─ exact declared `# Name:` (case-insensitive)
//!     │
//!     ├──> Graph Assembler
//!     │      ├─ dispatch edges, else include edges, else standalone edges
//!     │      └─ missing-definition sets
//!     │
//!     ├──> Reachability Graph (petgraph)
//!     │      └─ rule files nothing reaches
//!     │
//!     └──> Report
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use legacy_rules_graph::{inspect_root, InspectOptions};
//!
//! let report = inspect_root("/opt/rules", None, InspectOptions::default()).unwrap();
//! for name in &report.missing.dispatch_without_definitions {
//!     println!("undefined: {name}");
//! }
//! ```

mod assembler;
mod error;
mod graph;
mod inspector;
mod matcher;
mod types;

pub use assembler::{GraphAssembler, TraversalSource};
pub use error::{GraphError, Result};
pub use graph::{ReachabilityGraph, TraversalNode};
pub use inspector::{inspect_root, InspectOptions, RulesInspector};
pub use matcher::{IncludeMatches, NameMatcher};
pub use types::{
    dispatch_origin, BaseFiles, MissingDefinitions, Report, TraversalEdge, TraversalStep,
    INCLUDES_ORIGIN, STANDALONE_ORIGIN,
};
