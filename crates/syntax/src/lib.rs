//! # Legacy Rules Syntax
//!
//! Lexical extraction for the legacy rule language. Nothing here evaluates rule code:
//! every parser is a line or pattern scan that tolerates unrelated content.
//!
//! ## Inputs
//!
//! ```text
//! base.includes ──> parse_includes_*      └─> IncludeEntry[]   (name, path)
//! base.load     ──> LoadManifestParser    └─> String[]         (startup calls)
//! base.rules    ──> DispatchParser        └─> DispatchRule[]   (condition, calls)
//! *.rules       ──> MetadataParser        └─> RuleFileMeta     (# Name:, $rulesfile)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use legacy_rules_syntax::DispatchParser;
//!
//! let parser = DispatchParser::new().unwrap();
//! let rules = parser.parse_str("if ($vendor eq \"acme\") {\n    acme();\n}\n");
//! assert_eq!(rules[0].functions, vec!["acme"]);
//! ```

mod dispatch;
mod error;
mod manifest;
mod metadata;
mod text;
mod types;

pub use dispatch::DispatchParser;
pub use error::{Result, SyntaxError};
pub use manifest::{parse_includes_file, parse_includes_str, LoadManifestParser};
pub use metadata::MetadataParser;
pub use text::{decode_lossy, read_text, read_text_if_exists, try_read_text};
pub use types::{DispatchRule, IncludeEntry, RuleFileMeta};
