//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skysweep - Bluesky account archival and retention sweeps.
#[derive(Parser, Debug)]
#[command(name = "skysweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive the account, then sweep stale or viral content
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `skysweep check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file and print the effective policy
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "skysweep.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "skysweep.toml")]
    pub config: PathBuf,

    /// Delete posts with strictly more reposts than this (0 disables)
    #[arg(short = 'l', long)]
    pub max_reposts: Option<u32>,

    /// Delete posts and likes at least this many whole days old (0 disables)
    #[arg(short = 's', long)]
    pub stale_limit: Option<u32>,

    /// Comma-separated domains whose posts are never deleted
    #[arg(short = 'd', long)]
    pub domains_to_protect: Option<String>,

    /// Likes cursor at which pagination stops early (list cursors with -vv)
    #[arg(long)]
    pub fixed_likes_cursor: Option<String>,

    /// Skip confirmation prompts (necessary for automation)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Compute and print the plan but leave the account untouched
    #[arg(long)]
    pub dry_run: bool,

    /// Do not download the archive before sweeping
    #[arg(long)]
    pub skip_archive: bool,

    /// Download the archive and exit without sweeping
    #[arg(long)]
    pub archive_only: bool,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Show more about what is happening (-v), or much more (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
