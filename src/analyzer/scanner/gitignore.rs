use std::io;
use std::path::Path;

use super::fs::FileSystem;
use crate::types::{DotcursorError, Result};

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Usable pattern lines of a `.gitignore` body.
///
/// Blank lines, `#` comments and `!` negations are dropped; negation is not
/// supported by the matcher.
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            if line.starts_with('!') {
                tracing::debug!("Skipping unsupported negation pattern '{}'", line);
                return false;
            }
            true
        })
        .map(String::from)
        .collect()
}

/// Patterns from `dir/.gitignore`; empty when the file does not exist.
pub fn load_patterns(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<String>> {
    let path = dir.join(GITIGNORE_FILE);
    match fs.read_to_string(&path) {
        Ok(content) => Ok(parse_patterns(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(DotcursorError::traversal(path, e)),
    }
}

/// Patterns from `.gitignore` files above `root`, outermost first.
///
/// Climbs until a directory containing `.git` (the repository top) or the
/// filesystem root. `root`'s own file is not included; the analyzer reads it.
pub fn load_ancestor_patterns(fs: &dyn FileSystem, root: &Path) -> Result<Vec<String>> {
    let mut layers = Vec::new();

    if !is_repository_top(fs, root) {
        for dir in root.ancestors().skip(1) {
            let patterns = load_patterns(fs, dir)?;
            if !patterns.is_empty() {
                tracing::debug!(
                    "Inherited {} ignore patterns from {}",
                    patterns.len(),
                    dir.display()
                );
            }
            layers.push(patterns);
            if is_repository_top(fs, dir) {
                break;
            }
        }
    }

    Ok(layers.into_iter().rev().flatten().collect())
}

fn is_repository_top(fs: &dyn FileSystem, dir: &Path) -> bool {
    fs.exists(&dir.join(".git"))
}
