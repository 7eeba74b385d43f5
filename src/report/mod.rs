//! Report rendering and output.
//!
//! Markdown is the primary format; JSON exposes the same tree for tooling.

pub mod markdown;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{DirectoryRecord, IoResultExt, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown report format: {}. Valid values: markdown, json",
                s
            )),
        }
    }
}

pub fn render(record: &DirectoryRecord, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Markdown => Ok(markdown::render(record)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(record)? + "\n"),
    }
}

/// Render and write the report, replacing any previous one
pub fn write_report(record: &DirectoryRecord, format: ReportFormat, path: &Path) -> Result<()> {
    let content = render(record, format)?;
    fs::write(path, content).at_path(path)?;
    tracing::debug!("Wrote {} report to {}", format, path.display());
    Ok(())
}
