//! Config Command
//!
//! Usage:
//!   dotcursor config show [-f json]
//!   dotcursor config path
//!   dotcursor config init [-g] [--force]

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::{DotcursorError, IoResultExt, Result};

fn current_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    cwd.canonicalize().at_path(&cwd)
}

/// `true` for JSON, `false` for TOML
fn wants_json(format: &str) -> Result<bool> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(false),
        "json" => Ok(true),
        _ => Err(DotcursorError::Config(format!(
            "Unknown config format: {}. Valid values: toml, json",
            format
        ))),
    }
}

/// Print the merged configuration for the current directory
pub fn show(format: &str) -> Result<()> {
    let as_json = wants_json(format)?;
    let root = current_root()?;
    let config = ConfigLoader::load(&root)?;
    print!("{}", ConfigLoader::render(&config, as_json)?);
    if as_json {
        println!();
    }
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    let root = current_root()?;
    let marker = |p: &std::path::Path| if p.exists() { "" } else { " (not found)" };

    match ConfigLoader::global_config_path() {
        Some(global) => println!("Global:  {}{}", global.display(), marker(&global)),
        None => println!("Global:  (cannot determine config directory)"),
    }
    let project = ConfigLoader::project_config_path(&root);
    println!("Project: {}{}", project.display(), marker(&project));
    Ok(())
}

/// Write a default config file
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(&current_root()?, force)?
    };
    output.success(&format!("Config ready: {}", path.display()));
    Ok(())
}
