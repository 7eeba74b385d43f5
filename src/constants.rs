//! Global Constants
//!
//! Centralized constants for traversal and reporting.

/// Traversal exclusion constants
pub mod exclusion {
    /// Entry names that are never analyzed
    pub const BUILTIN_NAMES: &[&str] = &[
        "node_modules",
        "dist",
        "build",
        "coverage",
        "package-lock.json",
        "yarn.lock",
        ".DS_Store",
        "Thumbs.db",
    ];

    /// Binary lockfile suffixes (e.g. `bun.lockb`)
    pub const LOCKFILE_SUFFIXES: &[&str] = &[".lockb"];
}

/// Report output constants
pub mod report {
    /// Default report file, written at the project root
    pub const DEFAULT_OUTPUT_FILE: &str = ".cursor.directory_structure.md";

    /// Per-extension size limits in kilobytes; larger files get a warning
    pub const SIZE_LIMITS_KB: &[(&str, u64)] = &[
        ("ts", 400),
        ("js", 400),
        ("tsx", 400),
        ("jsx", 400),
        ("py", 500),
        ("java", 500),
        ("cpp", 500),
    ];
}

/// Configuration file constants
pub mod config {
    /// Project config file, looked up in the analyzed root
    pub const PROJECT_CONFIG_FILE: &str = ".dotcursor.toml";

    /// Global config file name under the config directory
    pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

    /// Application directory name under `$XDG_CONFIG_HOME`
    pub const APP_DIR: &str = "dotcursor";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "DOTCURSOR_";
}
