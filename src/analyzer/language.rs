//! File Type Classification
//!
//! **Single source of truth** for mapping file names to language labels.
//! The label is what reports display; the size limit feeds the renderer's
//! "file too large" warning.
//!
//! ```rust,ignore
//! use dotcursor::analyzer::language::{FileType, classify};
//!
//! assert_eq!(FileType::from_file_name("main.ts"), FileType::TypeScript);
//! assert_eq!(classify("main.ts"), "TypeScript");
//! assert_eq!(classify("README"), "Unknown");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// File Type Metadata Table
// =============================================================================

struct FileTypeMeta {
    /// Label shown in reports
    label: &'static str,
    /// Lowercase extensions mapping to this type
    extensions: &'static [&'static str],
}

macro_rules! type_meta {
    ($label:literal, [$($ext:literal),*]) => {
        FileTypeMeta {
            label: $label,
            extensions: &[$($ext),*],
        }
    };
}

impl FileType {
    fn meta(&self) -> FileTypeMeta {
        match self {
            FileType::TypeScript => type_meta!("TypeScript", ["ts"]),
            FileType::JavaScript => type_meta!("JavaScript", ["js"]),
            FileType::Python => type_meta!("Python", ["py"]),
            FileType::Java => type_meta!("Java", ["java"]),
            FileType::Cpp => type_meta!("C++", ["cpp"]),
            FileType::CHeader => type_meta!("C/C++ Header", ["h"]),
            FileType::ReactJsx => type_meta!("React JSX", ["jsx"]),
            FileType::ReactTsx => type_meta!("React TSX", ["tsx"]),
            FileType::Markdown => type_meta!("Markdown", ["md"]),
            FileType::Json => type_meta!("JSON", ["json"]),
            FileType::Yaml => type_meta!("YAML", ["yml", "yaml"]),
            FileType::Css => type_meta!("CSS", ["css"]),
            FileType::Html => type_meta!("HTML", ["html"]),
            FileType::Unknown => type_meta!("Unknown", []),
        }
    }
}

// =============================================================================
// FileType Enum
// =============================================================================

/// Language classification of a file, derived from its extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FileType {
    TypeScript,
    JavaScript,
    Python,
    Java,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C/C++ Header")]
    CHeader,
    #[serde(rename = "React JSX")]
    ReactJsx,
    #[serde(rename = "React TSX")]
    ReactTsx,
    Markdown,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "YAML")]
    Yaml,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "HTML")]
    Html,
    #[default]
    Unknown,
}

impl FileType {
    /// Human-readable label, never empty
    pub fn as_str(&self) -> &'static str {
        self.meta().label
    }

    /// Look up an extension (without the dot), case-insensitively
    pub fn from_extension(ext: &str) -> Self {
        let ext_lower = ext.to_lowercase();

        Self::all_variants()
            .iter()
            .copied()
            .find(|ft| ft.meta().extensions.contains(&ext_lower.as_str()))
            .unwrap_or(FileType::Unknown)
    }

    /// Classify by the text after the last `.` of a file name
    pub fn from_file_name(file_name: &str) -> Self {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(FileType::Unknown)
    }

    pub fn all_variants() -> &'static [FileType] {
        &[
            FileType::TypeScript, FileType::JavaScript, FileType::Python,
            FileType::Java, FileType::Cpp, FileType::CHeader, FileType::ReactJsx,
            FileType::ReactTsx, FileType::Markdown, FileType::Json, FileType::Yaml,
            FileType::Css, FileType::Html, FileType::Unknown,
        ]
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ();

    /// Parse a report label back into a type ("React TSX" -> `ReactTsx`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_variants()
            .iter()
            .copied()
            .find(|ft| ft.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Label for a file name; `"Unknown"` when the extension is missing or unmapped.
pub fn classify(file_name: &str) -> &'static str {
    FileType::from_file_name(file_name).as_str()
}
