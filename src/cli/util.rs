//! CLI Common Utilities
//!
//! Resolves the root, configuration and report path once per invocation so
//! command handlers (and every watch re-run) share the same context.

use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use crate::analyzer::scanner::LocalFileSystem;
use crate::analyzer::scanner::gitignore;
use crate::analyzer::{AnalysisOptions, DirectoryAnalyzer};
use crate::config::{Config, ConfigLoader};
use crate::report::{self, ReportFormat};
use crate::types::{IoResultExt, Result};

/// Command-line overrides layered on top of the loaded config
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub exclude_dirs: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub no_gitignore: bool,
    pub format: Option<ReportFormat>,
    pub watch: bool,
}

/// Everything one generate run needs
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Canonical project root
    pub root: PathBuf,
    /// Effective configuration after CLI overrides
    pub config: Config,
    /// Absolute report path
    pub output_path: PathBuf,
}

/// What a single run produced
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub files: usize,
    pub directories: usize,
    pub elapsed: Duration,
}

impl RunContext {
    /// Resolve `path` (default: current directory), load config, apply overrides
    pub fn prepare(path: Option<PathBuf>, overrides: Overrides) -> Result<Self> {
        let root = match path {
            Some(p) => p,
            None => std::env::current_dir()?,
        };
        let root = root.canonicalize().at_path(&root)?;

        let mut config = ConfigLoader::load(&root)?;
        apply_overrides(&mut config, overrides);
        config.validate()?;

        let output_path = resolve_output(&root, Path::new(&config.output.file));

        Ok(Self {
            root,
            config,
            output_path,
        })
    }

    pub fn format(&self) -> ReportFormat {
        self.config.output.format
    }

    pub fn watch_enabled(&self) -> bool {
        self.config.watch.enabled
    }

    /// Analyzer options with ancestor `.gitignore` patterns read fresh.
    /// A report written inside the root is never analyzed itself.
    pub fn analysis_options(&self) -> Result<AnalysisOptions> {
        let mut options = self.config.analysis_options();
        if let Some(report) = self.report_relative_path() {
            options.skip_paths.push(report);
        }
        if options.respect_gitignore {
            let mut patterns = gitignore::load_ancestor_patterns(&LocalFileSystem, &self.root)?;
            patterns.append(&mut options.ignore_patterns);
            options.ignore_patterns = patterns;
        }
        Ok(options)
    }

    /// `/`-joined report path under the root, if it lives there
    fn report_relative_path(&self) -> Option<String> {
        let relative = self.output_path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join("/"))
    }

    /// Analyze the root and write the report
    pub fn generate(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let options = self.analysis_options()?;
        let record = DirectoryAnalyzer::new(&self.root).analyze(&self.root, &options)?;
        report::write_report(&record, self.format(), &self.output_path)?;

        Ok(RunSummary {
            files: record.file_count(),
            directories: record.directory_count(),
            elapsed: start.elapsed(),
        })
    }
}

fn apply_overrides(config: &mut Config, overrides: Overrides) {
    if let Some(output) = overrides.output {
        config.output.file = output.to_string_lossy().into_owned();
    }
    if let Some(format) = overrides.format {
        config.output.format = format;
    }
    config.analysis.exclude_dirs.extend(overrides.exclude_dirs);
    config.analysis.ignore_patterns.extend(overrides.ignore_patterns);
    if overrides.no_gitignore {
        config.analysis.respect_gitignore = false;
    }
    if overrides.watch {
        config.watch.enabled = true;
    }
}

/// Relative report paths live under the project root
fn resolve_output(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}
