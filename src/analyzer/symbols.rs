//! Heuristic symbol extraction.
//!
//! A lexical scan, not a parser: each supported language has a rule table of
//! named alternatives that are joined into one regex, so a single left-to-right
//! pass yields names in the order their definitions appear. Strings and
//! comments are not recognised, and that is accepted.

use regex::Regex;
use std::sync::LazyLock;

use super::language::FileType;

/// One named alternative in a language's rule table
struct SymbolRule {
    /// Capture group name holding the symbol
    group: &'static str,
    /// Pattern containing `(?P<group>...)` exactly once
    pattern: &'static str,
}

const IDENT: &str = "[A-Za-z0-9_]+";

const SCRIPT_RULES: &[SymbolRule] = &[
    SymbolRule {
        group: "function",
        pattern: r"function\s+(?P<function>IDENT)",
    },
    SymbolRule {
        group: "arrow",
        pattern: r"const\s+(?P<arrow>IDENT)\s*=\s*(?:async\s*)?\([^)]*\)\s*=>",
    },
    SymbolRule {
        group: "class",
        pattern: r"class\s+(?P<class>IDENT)",
    },
];

const PYTHON_RULES: &[SymbolRule] = &[
    SymbolRule {
        group: "def",
        pattern: r"def\s+(?P<def>IDENT)\s*\([^)]*\):",
    },
    SymbolRule {
        group: "class",
        pattern: r"class\s+(?P<class>IDENT):",
    },
];

/// Compiled rule table for one language
struct RuleSet {
    regex: Regex,
    groups: Vec<&'static str>,
}

impl RuleSet {
    fn compile(rules: &'static [SymbolRule]) -> Self {
        let alternation = rules
            .iter()
            .map(|rule| format!("(?:{})", rule.pattern.replace("IDENT", IDENT)))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            regex: Regex::new(&alternation).expect("symbol rule table is a valid regex"),
            groups: rules.iter().map(|rule| rule.group).collect(),
        }
    }

    fn scan(&self, content: &str) -> Vec<String> {
        self.regex
            .captures_iter(content)
            .filter_map(|caps| {
                self.groups
                    .iter()
                    .find_map(|group| caps.name(group))
                    .map(|m| m.as_str().to_string())
            })
            .collect()
    }
}

static SCRIPT_RULE_SET: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(SCRIPT_RULES));
static PYTHON_RULE_SET: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(PYTHON_RULES));

fn rule_set(file_type: FileType) -> Option<&'static RuleSet> {
    match file_type {
        FileType::TypeScript | FileType::JavaScript => Some(&SCRIPT_RULE_SET),
        FileType::Python => Some(&PYTHON_RULE_SET),
        _ => None,
    }
}

/// Whether `extract` can return anything for this type
pub fn supports(file_type: FileType) -> bool {
    rule_set(file_type).is_some()
}

/// Function and class names defined in `content`, in document order.
///
/// Duplicates are kept. Types without a rule table yield an empty list.
pub fn extract(content: &str, file_type: FileType) -> Vec<String> {
    match rule_set(file_type) {
        Some(rules) => rules.scan(content),
        None => Vec::new(),
    }
}
