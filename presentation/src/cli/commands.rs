//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for diagnostic results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full profile description with the score breakdown
    Full,
    /// Winning profile and scores only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for dpc_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => dpc_domain::OutputFormat::Full,
            OutputFormat::Summary => dpc_domain::OutputFormat::Summary,
            OutputFormat::Json => dpc_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for dpc-diagnostic
#[derive(Parser, Debug)]
#[command(name = "dpc-diagnostic")]
#[command(author, version, about = "Spiritual profile self-assessment (DPC)")]
#[command(long_about = r#"
dpc-diagnostic walks you through the 33 DPC questions and tells you which of
the five emotional-spiritual profiles your answers point to.

Questions are read from the configured Supabase project. When the remote
tables are empty or incomplete they are re-populated from the bundled
snapshot; if that fails the snapshot is used directly.

Configuration files are loaded from (in priority order):
1. DPC_* environment variables (e.g. DPC_BACKEND__URL)
2. --config <path>     Explicit config file
3. ./dpc.toml          Project-level config
4. ~/.config/dpc-diagnostic/config.toml   Global config

Example:
  dpc-diagnostic                    # take the quiz
  dpc-diagnostic --offline          # take the quiz without a backend
  dpc-diagnostic register           # create an account, then take the quiz
  dpc-diagnostic login              # sign in to an existing account
  dpc-diagnostic sync               # re-populate the question tables
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format for the result
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Run against an in-memory store seeded from the bundled data
    #[arg(long, global = true)]
    pub offline: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Take the quiz (default)
    Quiz {
        /// Discard any stored progress and start from the first question
        #[arg(long)]
        restart: bool,
    },
    /// Re-populate the remote question tables from the snapshot
    Sync,
    /// Upsert the bundled sample profiles
    SeedProfiles,
    /// Create an account (or sign in to an existing one)
    Register,
    /// Sign in with e-mail and WhatsApp number, then take the quiz
    Login {
        /// Only sign in; do not start the quiz
        #[arg(long)]
        no_quiz: bool,
    },
    /// Show configuration sources and detected issues
    Config,
}

impl Cli {
    /// The subcommand to run, defaulting to the quiz
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Quiz { restart: false })
    }
}
