//! Unified Error Type System
//!
//! One error type (`DotcursorError`) for the whole library. Traversal is
//! all-or-nothing, so there are no retry categories here: an error either
//! aborts the run or it is not an error at all (a missing `.gitignore`).

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DotcursorError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    /// Listing, statting or reading an entry failed mid-traversal
    #[error("Failed to analyze {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DotcursorError>;

impl DotcursorError {
    /// Wrap an I/O error with the path it happened on
    pub fn traversal(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Traversal {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Attach a path to raw I/O results
pub trait IoResultExt<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|e| DotcursorError::traversal(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_traversal_display_includes_path() {
        let err = DotcursorError::traversal(
            "src/missing.ts",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "Failed to analyze src/missing.ts: gone");
    }

    #[test]
    fn test_at_path_maps_io_errors() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        let err = result.at_path("locked").unwrap_err();
        assert!(matches!(err, DotcursorError::Traversal { .. }));
    }

    #[test]
    fn test_config_error_display() {
        let err = DotcursorError::Config("bad".to_string());
        assert_eq!(err.to_string(), "Config error: bad");
    }
}
