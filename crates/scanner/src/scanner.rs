use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::paths::absolutize;

/// Limits and filters for the rule file walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Rule file extension, matched case-insensitively (without the dot)
    pub extension: String,

    /// Maximum directory depth below the root
    pub max_depth: usize,

    /// Stop the walk after this many rule files
    pub max_files: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

const DEFAULT_EXTENSION: &str = "rules";
const DEFAULT_MAX_DEPTH: usize = 64;
const DEFAULT_MAX_FILES: usize = 100_000;

/// What the caller asked to inspect: a rule root, optionally narrowed to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTarget {
    pub root: PathBuf,
    pub single_file: Option<PathBuf>,
}

impl RuleTarget {
    /// Interpret a user-supplied path. A file makes its parent the root.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let target = absolutize(path.as_ref())?;
        let (root, single_file) = if target.is_file() {
            let root = target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/"));
            (root, Some(target))
        } else {
            (target, None)
        };

        if !root.is_dir() {
            return Err(ScanError::InvalidRoot(root.display().to_string()));
        }
        Ok(Self { root, single_file })
    }
}

/// Recursive finder for rule files under a root
pub struct FileScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, options: ScanOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options,
        }
    }

    /// Rule files for a target: the single file when given, otherwise a full walk
    pub fn rule_files(target: &RuleTarget, options: &ScanOptions) -> Vec<PathBuf> {
        match &target.single_file {
            Some(file) => vec![file.clone()],
            None => Self::new(&target.root, options.clone()).scan(),
        }
    }

    /// Walk the root in file-name order and collect every rule file
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .max_depth(self.options.max_depth)
            .sort_by_file_name();

        for result in walker {
            match result {
                Ok(entry) => {
                    let is_file = entry.file_type().is_file()
                        || (entry.path_is_symlink() && entry.path().is_file());
                    if !is_file {
                        continue;
                    }
                    if !self.is_rule_file(entry.path()) {
                        continue;
                    }
                    if files.len() >= self.options.max_files {
                        log::warn!(
                            "Stopping scan of {} at {} rule files",
                            self.root.display(),
                            self.options.max_files
                        );
                        break;
                    }
                    files.push(entry.into_path());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::info!("Found {} rule files under {}", files.len(), self.root.display());
        files
    }

    fn is_rule_file(&self, path: &Path) -> bool {
        let suffix = format!(".{}", self.options.extension.to_lowercase());
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_lowercase().ends_with(&suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn finds_nested_rule_files_case_insensitively() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("vendor").join("cisco");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("base.rules"), "").unwrap();
        fs::write(temp.path().join("base.includes"), "").unwrap();
        fs::write(nested.join("CISCO.RULES"), "").unwrap();
        fs::write(nested.join("notes.txt"), "").unwrap();
        fs::write(temp.path().join("vendor").join("a.rules"), "").unwrap();

        let files = FileScanner::new(temp.path(), ScanOptions::default()).scan();
        assert_eq!(names(&files), vec!["base.rules", "a.rules", "CISCO.RULES"]);
    }

    #[test]
    fn walk_order_is_deterministic() {
        let temp = tempdir().unwrap();
        for name in ["c.rules", "a.rules", "b.rules"] {
            fs::write(temp.path().join(name), "").unwrap();
        }

        let scanner = FileScanner::new(temp.path(), ScanOptions::default());
        let first = scanner.scan();
        assert_eq!(names(&first), vec!["a.rules", "b.rules", "c.rules"]);
        assert_eq!(first, scanner.scan());
    }

    #[test]
    fn respects_depth_and_file_caps() {
        let temp = tempdir().unwrap();
        let deep = temp.path().join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::write(temp.path().join("top.rules"), "").unwrap();
        fs::write(deep.join("deep.rules"), "").unwrap();

        let shallow = ScanOptions {
            max_depth: 1,
            ..ScanOptions::default()
        };
        assert_eq!(names(&FileScanner::new(temp.path(), shallow).scan()), vec!["top.rules"]);

        let capped = ScanOptions {
            max_files: 1,
            ..ScanOptions::default()
        };
        assert_eq!(FileScanner::new(temp.path(), capped).scan().len(), 1);
    }

    #[test]
    fn single_file_target_bypasses_walk() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("one.rules"), "").unwrap();
        fs::write(temp.path().join("two.rules"), "").unwrap();

        let target = RuleTarget::from_path(temp.path().join("one.rules")).unwrap();
        assert_eq!(target.root, absolutize(temp.path()).unwrap());

        let files = FileScanner::rule_files(&target, &ScanOptions::default());
        assert_eq!(names(&files), vec!["one.rules"]);
    }

    #[test]
    fn missing_root_is_rejected() {
        let temp = tempdir().unwrap();
        let err = RuleTarget::from_path(temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, ScanError::InvalidRoot(_)));
    }
}
