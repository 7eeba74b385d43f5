//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/dotcursor/config.toml)
//! 3. Project config (<root>/.dotcursor.toml)
//! 4. Environment variables (DOTCURSOR_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::config::{APP_DIR, ENV_PREFIX, GLOBAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
use crate::types::{DotcursorError, IoResultExt, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project root:
    /// defaults → global → project → env vars
    pub fn load(project_root: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path(project_root);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. DOTCURSOR_OUTPUT__FILE -> output.file
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| DotcursorError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| DotcursorError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/dotcursor/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join(APP_DIR))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
    }

    /// Get path to a project's config file
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    /// Render the effective configuration
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| DotcursorError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default global config; returns the file path
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            DotcursorError::Config("Cannot determine global config directory".to_string())
        })?;

        fs::create_dir_all(&global_dir).at_path(&global_dir)?;

        let config_path = global_dir.join(GLOBAL_CONFIG_FILE);
        Self::write_default(&config_path, force)?;
        Ok(config_path)
    }

    /// Write the default project config; returns the file path
    pub fn init_project(project_root: &Path, force: bool) -> Result<PathBuf> {
        let config_path = Self::project_config_path(project_root);
        Self::write_default(&config_path, force)?;
        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_default(config_path: &Path, force: bool) -> Result<()> {
        if config_path.exists() && !force {
            info!("Config exists: {}", config_path.display());
            return Ok(());
        }

        fs::write(config_path, Self::default_config()).at_path(config_path)?;
        info!("Created config: {}", config_path.display());
        Ok(())
    }

    /// Default config file content (TOML)
    fn default_config() -> String {
        r#"# dotcursor configuration
# Project files (.dotcursor.toml) override the global file.

version = "1.0"

[analysis]
# Entry names skipped anywhere in the tree (node_modules, dist, build and
# coverage are always skipped)
exclude_dirs = []
# Extra gitignore-style patterns, e.g. ["*.snap", "fixtures/"]
ignore_patterns = []
respect_gitignore = true

[output]
file = ".cursor.directory_structure.md"
# markdown | json
format = "markdown"

[watch]
enabled = false
"#
        .to_string()
    }
}
