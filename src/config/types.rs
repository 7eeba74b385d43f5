//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/dotcursor/) and project (.dotcursor.toml) files.

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisOptions;
use crate::constants::report::DEFAULT_OUTPUT_FILE;
use crate::report::ReportFormat;
use crate::types::{DotcursorError, Result};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Traversal settings
    pub analysis: AnalysisConfig,

    /// Report output settings
    pub output: OutputConfig,

    /// Watch mode settings
    pub watch: WatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `DotcursorError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(DotcursorError::Config(
                "version must not be empty".to_string(),
            ));
        }

        let file = self.output.file.trim();
        if file.is_empty() {
            return Err(DotcursorError::Config(
                "output.file must not be empty".to_string(),
            ));
        }
        if file.ends_with('/') || file.ends_with('\\') {
            return Err(DotcursorError::Config(format!(
                "output.file must name a file, got '{}'",
                file
            )));
        }

        if let Some(blank) = self.analysis.exclude_dirs.iter().find(|d| d.trim().is_empty()) {
            return Err(DotcursorError::Config(format!(
                "analysis.exclude_dirs contains a blank entry: '{}'",
                blank
            )));
        }

        Ok(())
    }

    /// Options handed to the analyzer for one run
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::default()
            .with_exclude_dirs(self.analysis.exclude_dirs.clone())
            .with_ignore_patterns(self.analysis.ignore_patterns.clone())
            .with_gitignore(self.analysis.respect_gitignore)
            .with_watch(self.watch.enabled)
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Entry names to skip in addition to the built-in set
    pub exclude_dirs: Vec<String>,

    /// Extra gitignore-style patterns applied from the root
    pub ignore_patterns: Vec<String>,

    /// Read `.gitignore` files
    pub respect_gitignore: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: Vec::new(),
            ignore_patterns: Vec::new(),
            respect_gitignore: true,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file, relative to the analyzed root unless absolute
    pub file: String,

    pub format: ReportFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_OUTPUT_FILE.to_string(),
            format: ReportFormat::Markdown,
        }
    }
}

// =============================================================================
// Watch Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Keep running and regenerate on changes
    pub enabled: bool,
}
