//! Generate Command
//!
//! Usage:
//!   dotcursor [generate] [PATH] [-o FILE] [-e DIR]... [-i PATTERN]...
//!             [--no-gitignore] [-f markdown|json] [-w]
//!   dotcursor watch [PATH] ...

use std::path::PathBuf;

use tracing::info;

use crate::cli::ui::Output;
use crate::cli::util::{Overrides, RunContext, RunSummary};
use crate::types::Result;
use crate::watch::{self, WatchSettings};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Project root; the current directory when absent
    pub path: Option<PathBuf>,
    pub overrides: Overrides,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let output = Output::new();
    let ctx = RunContext::prepare(options.path, options.overrides)?;

    let summary = ctx.generate()?;
    log_summary(&summary);
    output.success(&format!(
        "Directory structure documentation generated: {}",
        ctx.config.output.file
    ));

    if ctx.watch_enabled() {
        watch_and_regenerate(&ctx, &output)?;
    }
    Ok(())
}

fn watch_and_regenerate(ctx: &RunContext, output: &Output) -> Result<()> {
    let settings =
        WatchSettings::new(&ctx.root, &ctx.output_path).with_options(&ctx.analysis_options()?);

    output.info(&format!(
        "Watching {} for changes (Ctrl+C to stop)",
        ctx.root.display()
    ));

    watch::watch(&settings, |changed| {
        output.event(&describe_change(ctx, changed));
        let summary = ctx.generate()?;
        log_summary(&summary);
        output.event(&format!(
            "✓ Regenerated {} ({} files in {:.2}s)",
            ctx.config.output.file,
            summary.files,
            summary.elapsed.as_secs_f64()
        ));
        Ok(())
    })
}

fn describe_change(ctx: &RunContext, changed: &[PathBuf]) -> String {
    match changed {
        [single] => {
            let shown = single.strip_prefix(&ctx.root).unwrap_or(single);
            format!("Changed: {} → regenerating...", shown.display())
        }
        many => format!("Changed {} paths → regenerating...", many.len()),
    }
}

fn log_summary(summary: &RunSummary) {
    info!(
        files = summary.files,
        directories = summary.directories,
        "Report written in {:.2}s",
        summary.elapsed.as_secs_f64()
    );
}
