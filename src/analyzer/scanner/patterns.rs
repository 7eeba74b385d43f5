//! Ignore-pattern matching (a gitignore subset).
//!
//! Every pattern floats: `foo.ts` behaves like `**/foo.ts`, and a directory
//! pattern `temp/` matches `temp` itself and anything beneath it at any depth.
//! There is no negation and no root anchoring.

use glob::Pattern;

/// One ignore line, pre-compiled
#[derive(Debug, Clone)]
enum CompiledPattern {
    /// `name/`: the entry itself or anything under it
    Directory { own: Glob, nested: Glob },
    /// Anything else, matched at any depth
    Path(Glob),
}

/// A glob, or the raw text when the glob engine rejected it
#[derive(Debug, Clone)]
enum Glob {
    Compiled(Pattern),
    /// Whole path equals the text, or ends with `/text`
    Literal(String),
    /// Some path segment equals the text
    Segment(String),
}

impl Glob {
    fn new(anchored: String, literal: &str) -> Self {
        match Pattern::new(&anchored) {
            Ok(pattern) => Glob::Compiled(pattern),
            Err(e) => {
                tracing::debug!("Treating invalid glob '{}' literally: {}", literal, e);
                Glob::Literal(literal.to_string())
            }
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Glob::Compiled(pattern) => pattern.matches(path),
            Glob::Literal(text) => path == text || path.ends_with(&format!("/{}", text)),
            Glob::Segment(text) => path.split('/').any(|seg| seg == text),
        }
    }
}

impl CompiledPattern {
    fn new(raw: &str) -> Self {
        let raw = raw.strip_prefix('/').unwrap_or(raw);

        match raw.strip_suffix('/') {
            Some(dir) => {
                let own = Glob::new(format!("**/{}", dir), dir);
                let nested = match Pattern::new(&format!("**/{}/**", dir)) {
                    Ok(pattern) => Glob::Compiled(pattern),
                    Err(_) => Glob::Segment(dir.to_string()),
                };
                CompiledPattern::Directory { own, nested }
            }
            None => CompiledPattern::Path(Glob::new(format!("**/{}", raw), raw)),
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            CompiledPattern::Directory { own, nested } => own.matches(path) || nested.matches(path),
            CompiledPattern::Path(glob) => glob.matches(path),
        }
    }
}

/// A pattern list compiled once and checked against many paths
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<CompiledPattern>,
}

impl IgnoreMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| CompiledPattern::new(p.as_ref()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any pattern matches the root-relative path
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        let path = normalize(relative_path);
        self.patterns.iter().any(|p| p.matches(&path))
    }
}

/// Convert platform separators to `/`
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// One-shot check of a path against a pattern list.
///
/// Blank and comment lines must already be filtered out by the caller.
pub fn matches<S: AsRef<str>>(relative_path: &str, patterns: &[S]) -> bool {
    IgnoreMatcher::new(patterns).is_ignored(relative_path)
}
