//! # Legacy Rules Scanner
//!
//! Filesystem side of the inspector: finding rule files and resolving include paths.
//!
//! ```text
//! target path
//!     │
//!     ├──> RuleTarget (root dir, optional single file)
//!     │
//!     ├──> FileScanner (sorted walk, depth/file caps)
//!     │      └─> rule files
//!     │
//!     └──> Include resolver
//!            └─> empty | absolute | relative | unresolved
//! ```

mod error;
mod paths;
mod resolver;
mod scanner;

pub use error::{Result, ScanError};
pub use paths::{absolutize, normalize, normalize_display};
pub use resolver::{resolve_include, resolve_include_path, IncludeResolution, MatchKind};
pub use scanner::{FileScanner, RuleTarget, ScanOptions};
