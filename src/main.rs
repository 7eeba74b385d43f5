use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dotcursor::ReportFormat;
use dotcursor::cli::Overrides;
use dotcursor::cli::commands::generate::GenerateOptions;

/// Parse report format from string
fn parse_report_format(s: &str) -> Result<ReportFormat, String> {
    s.parse()
}

#[derive(Parser)]
#[command(name = "dotcursor")]
#[command(
    version,
    about = "Generate a markdown map of a project's directory structure",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Args, Clone, Default)]
struct GenerateArgs {
    #[arg(help = "Project directory (default: current directory)")]
    path: Option<PathBuf>,
    #[arg(long, short, help = "Report file, relative to the project directory")]
    output: Option<PathBuf>,
    #[arg(long = "exclude", short = 'e', value_name = "DIR", help = "Entry name to skip (repeatable)")]
    exclude: Vec<String>,
    #[arg(long = "ignore", short = 'i', value_name = "PATTERN", help = "Gitignore-style pattern to skip (repeatable)")]
    ignore: Vec<String>,
    #[arg(long, help = "Do not read .gitignore files")]
    no_gitignore: bool,
    #[arg(long, short, value_parser = parse_report_format, help = "Report format: markdown, json")]
    format: Option<ReportFormat>,
    #[arg(long, short, help = "Keep running and regenerate on changes")]
    watch: bool,
}

impl GenerateArgs {
    fn into_options(self, force_watch: bool) -> GenerateOptions {
        GenerateOptions {
            path: self.path,
            overrides: Overrides {
                output: self.output,
                exclude_dirs: self.exclude,
                ignore_patterns: self.ignore,
                no_gitignore: self.no_gitignore,
                format: self.format,
                watch: self.watch || force_watch,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the directory structure report (default)
    Generate(GenerateArgs),

    /// Generate, then regenerate whenever the project changes
    Watch(GenerateArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            value_parser = ["toml", "json"],
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            dotcursor::cli::ui::Output::new().error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        None => {
            dotcursor::cli::commands::generate::run(cli.generate.into_options(false))?;
        }
        Some(Commands::Generate(args)) => {
            dotcursor::cli::commands::generate::run(args.into_options(false))?;
        }
        Some(Commands::Watch(args)) => {
            dotcursor::cli::commands::generate::run(args.into_options(true))?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show { format } => {
                dotcursor::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                dotcursor::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                dotcursor::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
