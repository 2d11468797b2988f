use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Lexically normalize a path: drop `.` components, fold `..` into its parent.
///
/// The filesystem is never consulted, so symlinks are left as written.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` cannot climb above the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Render a path with forward slashes after normalization.
pub fn normalize_display(path: &Path) -> String {
    normalize(path).to_string_lossy().replace('\\', "/")
}

/// Make a path absolute against the current directory, then normalize it.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    Ok(normalize(&env::current_dir()?.join(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drops_current_dir_components() {
        assert_eq!(normalize_display(Path::new("/rules/./x.rules")), "/rules/x.rules");
        assert_eq!(normalize_display(Path::new("./x.rules")), "x.rules");
    }

    #[test]
    fn folds_parent_components() {
        assert_eq!(
            normalize_display(Path::new("/rules/vendor/../core/a.rules")),
            "/rules/core/a.rules"
        );
        assert_eq!(normalize_display(Path::new("/../a.rules")), "/a.rules");
        assert_eq!(normalize_display(Path::new("../a/../b")), "../b");
    }

    #[test]
    fn empty_result_is_current_dir() {
        assert_eq!(normalize_display(Path::new("a/..")), ".");
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        assert_eq!(absolutize(Path::new("/a/./b")).unwrap(), PathBuf::from("/a/b"));
        assert!(absolutize(Path::new("rel")).unwrap().is_absolute());
    }
}
