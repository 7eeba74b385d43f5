//! Code Analyzer Module
//!
//! Builds the directory model a report is rendered from:
//! - File type classification by extension
//! - Heuristic function/class extraction
//! - Recursive scanning with layered ignore rules

pub mod language;
pub mod scanner;
pub mod symbols;

pub use language::{FileType, classify};
pub use scanner::{AnalysisOptions, DirectoryAnalyzer, analyze};
pub use symbols::extract;
