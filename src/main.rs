//! vsync - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use vsync::config::{Config, DEFAULT_CONFIG_PATH, Overrides};
use vsync::{GitCli, Orchestrator, RunReport};

/// Automatic semantic versioning for git.
#[derive(Parser, Debug)]
#[command(name = "vsync")]
#[command(about = "Bump versions, update the changelog and tag releases from commit messages")]
#[command(
    long_about = "vsync manages your project's version and changelog automatically.\n\n\
It picks the next version from the prefixes of the commit subjects since the last tag \
(for example `feat:` or `fix:`), prepends the release to the changelog, can commit that \
update, and creates the new tag. Trigger prefixes are configurable in vsync.toml."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config_path: PathBuf,

    /// Changelog file path
    #[arg(long, global = true)]
    changelog_path: Option<PathBuf>,

    /// Git repository path
    #[arg(long = "git", global = true)]
    git_path: Option<PathBuf>,

    /// Generate tags based on commit messages
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        global = true
    )]
    tags: Option<bool>,

    /// Generate changelog based on commit messages
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        global = true
    )]
    changelog: Option<bool>,

    /// Commit the changelog update
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        global = true
    )]
    autocommit: Option<bool>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Print the version number of vsync
    Version,
    /// Print the effective configuration, including flags
    Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Version) => {
            println!("{}", version_line());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config) => {
            print!("{}", load_config(cli)?.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        None => run(load_config(cli)?),
    }
}

/// The config file merged with command-line overrides.
fn load_config(cli: Cli) -> Result<Config> {
    let config = Config::load(&cli.config_path)
        .context("Failed to load configuration")?
        .with_overrides(Overrides {
            changelog_path: cli.changelog_path,
            repository_path: cli.git_path,
            tags: cli.tags,
            changelog: cli.changelog,
            autocommit: cli.autocommit,
        });
    Ok(config)
}

fn version_line() -> String {
    format!("vsync version: {}", env!("CARGO_PKG_VERSION"))
}

fn run(config: Config) -> Result<ExitCode> {
    let vcs = GitCli::new(&config.repository_path);
    let orchestrator = Orchestrator::new(config, vcs);

    if orchestrator.stages().is_empty() {
        warn!("No stages enabled, nothing to do");
    }

    let report = orchestrator.run().context("Release aborted before any change")?;
    print_report(&report);

    if report.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Print completed stages and a summary. Failures were already logged
/// by the orchestrator with their cause.
fn print_report(report: &RunReport) {
    for result in &report.results {
        if let Ok(outcome) = &result.outcome {
            println!("  [DONE] {}", outcome);
        }
    }

    let failed: Vec<String> = report
        .failures()
        .map(|(stage, _)| stage.to_string())
        .collect();
    if !failed.is_empty() {
        eprintln!();
        eprintln!(
            "{} of {} stage(s) failed: {}",
            failed.len(),
            report.results.len(),
            failed.join(", ")
        );
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "vsync=debug" } else { "vsync=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
