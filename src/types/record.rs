//! Analysis result model.
//!
//! A run produces exactly one [`DirectoryRecord`] tree. Records are plain data:
//! built once by the analyzer, then only read by renderers.

use serde::{Deserialize, Serialize};

use crate::analyzer::language::FileType;

/// One regular file that survived the exclusion rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Project-root-relative path, always `/`-separated
    pub path: String,
    /// Byte length at analysis time
    pub size_bytes: u64,
    /// Classification from the file extension
    pub file_type: FileType,
    /// Extracted function/class names in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
}

impl FileRecord {
    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
    }
}

/// One directory node; children are already filtered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Project-root-relative path; empty for the traversal root
    pub path: String,
    pub files: Vec<FileRecord>,
    pub subdirectories: Vec<DirectoryRecord>,
}

impl DirectoryRecord {
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }

    /// Files in this directory and every descendant
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryRecord::file_count)
                .sum::<usize>()
    }

    /// Descendant directories, not counting `self`
    pub fn directory_count(&self) -> usize {
        self.subdirectories.len()
            + self
                .subdirectories
                .iter()
                .map(DirectoryRecord::directory_count)
                .sum::<usize>()
    }
}
