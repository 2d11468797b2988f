use legacy_rules_syntax::RuleFileMeta;
use std::collections::BTreeMap;
use std::path::Path;

/// Links names to candidate rule files.
///
/// A file is a candidate for a name when the lowercase name is a substring of the
/// lowercase file name, or equals the lowercase declared name. Every candidate is kept:
/// short names can match many files and that ambiguity is reported, not resolved.
pub struct NameMatcher<'a> {
    files: Vec<Candidate<'a>>,
}

struct Candidate<'a> {
    path: &'a str,
    base_name: String,
    declared_name: Option<String>,
}

impl<'a> NameMatcher<'a> {
    pub fn new(metas: &'a [RuleFileMeta]) -> Self {
        let files = metas
            .iter()
            .map(|meta| Candidate {
                path: meta.path.as_str(),
                base_name: Path::new(&meta.path)
                    .file_name()
                    .map(|name| name.to_string_lossy().to_lowercase())
                    .unwrap_or_default(),
                declared_name: meta
                    .declared_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .map(str::to_lowercase),
            })
            .collect();
        Self { files }
    }

    /// Candidate files for `name`, in discovery order
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let target = name.to_lowercase();
        self.files
            .iter()
            .filter(|file| {
                file.base_name.contains(&target)
                    || file.declared_name.as_deref() == Some(target.as_str())
            })
            .map(|file| file.path.to_string())
            .collect()
    }
}

/// Multimap of name -> candidate files, built once and read-only afterwards.
///
/// Names with no candidate are absent, which is what the missing-definition sets test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeMatches {
    matches: BTreeMap<String, Vec<String>>,
}

impl IncludeMatches {
    /// Match every name once; repeated names are matched only the first time
    pub fn build<'n>(matcher: &NameMatcher<'_>, names: impl IntoIterator<Item = &'n str>) -> Self {
        let mut matches = BTreeMap::new();
        for name in names {
            if matches.contains_key(name) {
                continue;
            }
            let files = matcher.candidates(name);
            if files.is_empty() {
                log::debug!("No rule file matches {name}");
                continue;
            }
            if files.len() > 1 {
                log::debug!("{name} is ambiguous: {} candidate files", files.len());
            }
            matches.insert(name.to_string(), files);
        }
        Self { matches }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matches.contains_key(name)
    }

    /// Files matched for `name`; empty when unmatched
    pub fn files(&self, name: &str) -> &[String] {
        self.matches.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(path: &str, declared: Option<&str>) -> RuleFileMeta {
        RuleFileMeta {
            path: path.to_string(),
            declared_name: declared.map(str::to_string),
            rulesfile_label: None,
        }
    }

    #[test]
    fn substring_of_base_name_matches_all_candidates() {
        let metas = vec![
            meta("/r/vendor_a.rules", None),
            meta("/r/vendor_ab.rules", None),
            meta("/r/vendor_b.rules", None),
        ];
        let matcher = NameMatcher::new(&metas);
        assert_eq!(
            matcher.candidates("VENDOR_A"),
            vec!["/r/vendor_a.rules", "/r/vendor_ab.rules"]
        );
    }

    #[test]
    fn declared_name_must_match_exactly() {
        let metas = vec![
            meta("/r/x1.rules", Some("Cisco Traps")),
            meta("/r/x2.rules", Some("Cisco Traps Extra")),
        ];
        let matcher = NameMatcher::new(&metas);
        assert_eq!(matcher.candidates("cisco traps"), vec!["/r/x1.rules"]);
    }

    #[test]
    fn directory_names_do_not_match() {
        let metas = vec![meta("/r/juniper/base.rules", None)];
        let matcher = NameMatcher::new(&metas);
        assert!(matcher.candidates("juniper").is_empty());
    }

    #[test]
    fn multimap_skips_unmatched_and_repeated_names() {
        let metas = vec![meta("/r/core.rules", None), meta("/r/core_ext.rules", None)];
        let matcher = NameMatcher::new(&metas);
        let matches = IncludeMatches::build(&matcher, ["core", "missing", "core"]);

        assert_eq!(matches.len(), 1);
        assert!(matches.contains("core"));
        assert!(!matches.contains("missing"));
        assert_eq!(matches.files("core").len(), 2);
        assert!(matches.files("missing").is_empty());
    }
}
