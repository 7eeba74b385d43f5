pub mod directory;
pub mod fs;
pub mod gitignore;
pub mod patterns;

pub use directory::{AnalysisOptions, DirectoryAnalyzer, SkipReason, analyze, skip_reason};
pub use fs::{DirEntry, EntryKind, FileSystem, LocalFileSystem};
pub use patterns::{IgnoreMatcher, matches};
