use crate::constants::{verbosity, DEFAULT_CONFIG_FILE};
use crate::orchestrator::MissingAssets;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for cdn-localizer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite CDN references in the selected projects (with backup).
    Run(RunArgs),
    /// Report would-be replacements without touching any file.
    DryRun(SelectArgs),
    /// Check that the mapped local files exist in the static directories.
    Check(CheckArgs),
    /// Validate project layout and write access.
    Validate(SelectArgs),
    /// Write a default configuration file.
    Init,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Process only this project id instead of every enabled project.
    #[arg(short, long, value_name = "ID")]
    pub project: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Do not ask for confirmation and skip the dry-run preview.
    #[arg(short, long)]
    pub yes: bool,

    /// Create placeholder files for missing static assets.
    #[arg(long, conflicts_with = "strict_assets")]
    pub placeholders: bool,

    /// Skip projects whose mapped static assets are missing.
    #[arg(long)]
    pub strict_assets: bool,
}

impl RunArgs {
    pub fn missing_assets(&self) -> MissingAssets {
        if self.placeholders {
            MissingAssets::CreatePlaceholders
        } else if self.strict_assets {
            MissingAssets::Abort
        } else {
            MissingAssets::Warn
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Create placeholder files for missing static assets.
    #[arg(long)]
    pub placeholders: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
