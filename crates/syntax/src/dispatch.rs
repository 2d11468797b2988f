use crate::error::Result;
use crate::text::read_text_if_exists;
use crate::types::DispatchRule;
use regex::Regex;
use std::path::Path;

/// Line-oriented parser for the dispatch file.
///
/// Blocks are flat: an `if`/`elsif` opening line always closes the block before it.
/// Calls seen outside of any block are ignored.
pub struct DispatchParser {
    condition: Regex,
    call: Regex,
}

#[derive(Debug)]
enum ParserState {
    Idle,
    InBlock {
        condition: String,
        functions: Vec<String>,
    },
}

impl ParserState {
    /// Close the open block, if any, into `rules`
    fn flush(self, rules: &mut Vec<DispatchRule>) {
        if let Self::InBlock {
            condition,
            functions,
        } = self
        {
            rules.push(DispatchRule {
                condition,
                functions,
            });
        }
    }
}

impl DispatchParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            condition: Regex::new(r"^\s*(if|elsif)\s*\((.+)\)\s*\{\s*$")?,
            call: Regex::new(r"\b([A-Za-z0-9_]+)\s*\(\s*\)\s*;\s*$")?,
        })
    }

    /// Parse dispatch text into rules, in file order
    pub fn parse_str(&self, content: &str) -> Vec<DispatchRule> {
        let mut rules = Vec::new();
        let mut state = ParserState::Idle;

        for line in content.lines() {
            if let Some(caps) = self.condition.captures(line) {
                let condition = caps
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                std::mem::replace(&mut state, ParserState::Idle).flush(&mut rules);
                state = ParserState::InBlock {
                    condition,
                    functions: Vec::new(),
                };
                continue;
            }

            if let ParserState::InBlock { functions, .. } = &mut state {
                if let Some(name) = self.call.captures(line).and_then(|caps| caps.get(1)) {
                    functions.push(name.as_str().to_string());
                }
            }
        }

        state.flush(&mut rules);
        rules
    }

    /// Parse a dispatch file; a missing file has no rules.
    pub fn parse_file(&self, path: &Path) -> Vec<DispatchRule> {
        let Some(content) = read_text_if_exists(path) else {
            log::debug!("No dispatch file at {}", path.display());
            return Vec::new();
        };
        let rules = self.parse_str(&content);
        log::debug!("Parsed {} dispatch rules from {}", rules.len(), path.display());
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(condition: &str, functions: &[&str]) -> DispatchRule {
        DispatchRule {
            condition: condition.to_string(),
            functions: functions.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn two_sequential_blocks() {
        let content = r#"
if ($enterprise eq "1.3.6.1.4.1.9") {
    f();
    g();
}
if ($enterprise eq "1.3.6.1.4.1.2636") {
    f();
    g();
}
"#;
        let parser = DispatchParser::new().unwrap();
        assert_eq!(
            parser.parse_str(content),
            vec![
                rule(r#"$enterprise eq "1.3.6.1.4.1.9""#, &["f", "g"]),
                rule(r#"$enterprise eq "1.3.6.1.4.1.2636""#, &["f", "g"]),
            ]
        );
    }

    #[test]
    fn calls_before_first_block_are_ignored() {
        let content = "setup();\nif (a) {\n  run();\n}\n";
        let parser = DispatchParser::new().unwrap();
        assert_eq!(parser.parse_str(content), vec![rule("a", &["run"])]);
    }

    #[test]
    fn opening_line_mid_block_closes_previous_block() {
        let content = "if (a) {\n  one();\n  elsif (b) {\n  two();\n  two();\n";
        let parser = DispatchParser::new().unwrap();
        assert_eq!(
            parser.parse_str(content),
            vec![rule("a", &["one"]), rule("b", &["two", "two"])]
        );
    }

    #[test]
    fn leading_context_before_call_is_tolerated() {
        let content = "if ( $x == 1 ) {\n  $result = vendor_a();\n  lookup(\"k\");\n  foo(); # trailing\n}\n";
        let parser = DispatchParser::new().unwrap();
        assert_eq!(parser.parse_str(content), vec![rule("$x == 1", &["vendor_a"])]);
    }

    #[test]
    fn block_without_calls_is_kept() {
        let parser = DispatchParser::new().unwrap();
        assert_eq!(parser.parse_str("if (x) {\n}\n"), vec![rule("x", &[])]);
    }

    #[test]
    fn empty_input_has_no_rules() {
        let parser = DispatchParser::new().unwrap();
        assert!(parser.parse_str("").is_empty());
        assert!(parser.parse_str("a();\nb();\n").is_empty());
    }
}
