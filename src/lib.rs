//! dotcursor - Directory Structure Documentation Generator
//!
//! Walks a project tree, classifies files by extension, picks out top-level
//! function and class names with lightweight patterns, and writes a nested
//! markdown (or JSON) map of the project.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dotcursor::{AnalysisOptions, analyze, report};
//!
//! let options = AnalysisOptions::default().with_ignore_patterns(vec!["*.log".into()]);
//! let record = analyze(".", &options)?;
//! let markdown = report::markdown::render(&record);
//! # Ok::<(), dotcursor::DotcursorError>(())
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: traversal, ignore rules, type classification, symbol extraction
//! - [`report`]: markdown and JSON rendering
//! - [`config`]: layered configuration
//! - [`watch`]: regeneration on filesystem changes

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod report;
pub mod types;
pub mod watch;

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::{DirectoryRecord, DotcursorError, FileRecord, Result};

// Analyzer
pub use analyzer::scanner::{IgnoreMatcher, matches};
pub use analyzer::{AnalysisOptions, DirectoryAnalyzer, FileType, analyze, classify, extract};

// Report
pub use report::ReportFormat;
