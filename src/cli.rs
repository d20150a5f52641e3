//! CLI argument parsing for filehop

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "filehop")]
#[command(version)]
#[command(about = "Learn which files get read next from agent session logs", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project root whose sessions are analyzed (default: current directory)
    #[arg(long = "project", value_name = "PATH", global = true)]
    pub project: Option<String>,

    /// Read sessions from this directory instead of the resolved default
    #[arg(long = "sessions-dir", value_name = "DIR", global = true)]
    pub sessions_dir: Option<PathBuf>,

    /// TOML settings file
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Redis connection string
    #[arg(long = "redis-url", value_name = "URL", env = "REDIS_URL", global = true)]
    pub redis_url: Option<String>,

    /// Key namespace for stored transitions
    #[arg(long = "namespace", value_name = "NAME", global = true)]
    pub namespace: Option<String>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show session, event and file counts
    Stats,

    /// Build the transition matrix and show the most frequent transitions
    Transitions {
        /// Number of transitions to show
        #[arg(long = "top", value_name = "N")]
        top: Option<usize>,
    },

    /// Add the transition matrix to Redis (counts accumulate across syncs)
    Sync,

    /// Predict the next files after FILE (several files are combined)
    Predict {
        /// Currently open file(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Number of predictions to show
        #[arg(long = "top", value_name = "N")]
        top: Option<usize>,
    },
}
