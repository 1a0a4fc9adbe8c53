pub mod commands;
pub mod context;
pub mod output;

use clap::{Args, Parser, Subcommand};

use crate::config::settings::Overrides;

/// Watch accounts for name changes. Keep an audit trail of every transition.
#[derive(Parser, Debug)]
#[command(name = "namewatch", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to alternative config directory
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the .env file read for credentials
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default config in the current directory
    Init,

    /// Poll the lookup API and record name changes until interrupted
    Watch(WatchArgs),

    /// Show recorded name changes
    Log {
        /// Only show changes for this account ID
        #[arg(long)]
        entity: Option<String>,
        /// Filter entries since this date (ISO 8601)
        #[arg(long)]
        since: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
        /// Audit log file to read
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Show resolved configuration
    Status(SourceArgs),
}

/// Where to look and what to look at.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Account ID to watch. Repeat or comma-separate for several
    #[arg(long = "entity", env = "TARGET_USER_ID", value_delimiter = ',')]
    pub entities: Vec<String>,

    /// API bearer token
    #[arg(long, env = "TWITTER_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,

    /// Lookup API base URL
    #[arg(long, env = "NAMEWATCH_API_HOST")]
    pub api_host: Option<String>,

    /// Attribute to track: username or name
    #[arg(long)]
    pub field: Option<String>,

    /// Audit log file to append changes to
    #[arg(long)]
    pub log_file: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Seconds between polls (0 = poll once)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,

    /// Stop after N polls
    #[arg(long)]
    pub cycles: Option<u64>,
}

impl SourceArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            entities: self.entities.clone(),
            bearer_token: self.bearer_token.clone(),
            api_host: self.api_host.clone(),
            field: self.field.clone(),
            log_file: self.log_file.clone(),
            ..Default::default()
        }
    }
}

impl WatchArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            interval_secs: self.interval,
            once: self.once,
            cycles: self.cycles,
            ..self.source.overrides()
        }
    }
}
