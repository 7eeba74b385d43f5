//! Configuration Management
//!
//! Hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/dotcursor/config.toml)
//! 3. Project config (<root>/.dotcursor.toml)
//! 4. Environment variables (DOTCURSOR_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
