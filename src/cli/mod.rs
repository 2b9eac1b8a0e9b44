//! Command-line interface for `gh-triage`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{CliOverrides, Config};
use crate::logging;
use crate::output::OutputContext;

/// `gh-triage` (triage) - Issue/PR triage cache for a GitHub organization.
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(
    author,
    version,
    about = "Track open community issues and PRs of a GitHub organization",
    long_about = None,
    after_help = "Running `triage` with no command performs a sync."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit log lines as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// GitHub organization to track
    #[arg(long, global = true, value_name = "ORG")]
    pub org: Option<String>,

    /// Directory holding the snapshot file
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch open issues/PRs and reconcile them into the snapshot
    Sync(SyncArgs),

    /// List cached issues/PRs, optionally filtered (alias: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one cached record
    Show(SelectorArgs),

    /// Re-fetch one record and update the snapshot
    Refresh(SelectorArgs),

    /// Open a record in the browser
    Open(SelectorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Reconcile and report without writing the snapshot
    #[arg(long)]
    pub dry_run: bool,

    /// Only print the summary, not the list
    #[arg(long)]
    pub summary_only: bool,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive filter on title, repository name or number
    pub query: Vec<String>,

    /// Show at most N records
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct SelectorArgs {
    /// Record id, `#NUMBER` or `REPO#NUMBER`
    pub selector: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(long)]
    pub short: bool,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let ctx = OutputContext::from_flags(cli.json, cli.quiet);
    let command = cli.command.unwrap_or_else(|| Commands::Sync(SyncArgs::default()));
    tracing::debug!(command = command.name(), "Dispatching");

    // Commands that never touch configuration.
    match &command {
        Commands::Completions(args) => {
            commands::completions::execute(args);
            return Ok(());
        }
        Commands::Version(args) => {
            commands::version::execute(args, &ctx);
            return Ok(());
        }
        _ => {}
    }

    let overrides = CliOverrides {
        org: cli.org,
        cache_dir: cli.cache_dir,
    };
    let config = Config::load(&overrides)?;

    match command {
        Commands::Sync(args) => commands::sync::execute(&args, &config, &ctx)?,
        Commands::List(args) => commands::list::execute(&args, &config, &ctx)?,
        Commands::Show(args) => commands::show::execute(&args, &config, &ctx)?,
        Commands::Refresh(args) => commands::refresh::execute(&args, &config, &ctx)?,
        Commands::Open(args) => commands::open::execute(&args, &config, &ctx)?,
        Commands::Completions(_) | Commands::Version(_) => {}
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Sync(_) => "sync",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::Refresh(_) => "refresh",
            Self::Open(_) => "open",
            Self::Completions(_) => "completions",
            Self::Version(_) => "version",
        }
    }
}
