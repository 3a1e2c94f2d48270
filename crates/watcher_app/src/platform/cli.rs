use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use watch_logging::{LevelFilter, LogDestination};

#[derive(Parser, Debug)]
#[command(name = "job-watch")]
#[command(about = "Follow a server-side job until it finishes", version)]
pub struct Cli {
    /// Id of the job to watch
    pub job_id: String,

    /// Server base URL; status and log URLs are derived from it
    #[arg(long)]
    pub base_url: Option<String>,

    /// Explicit status endpoint (overrides the derived one)
    #[arg(long)]
    pub status_url: Option<String>,

    /// Explicit log-file endpoint (overrides the derived one)
    #[arg(long)]
    pub log_url: Option<String>,

    /// Auth token sent with every request
    #[arg(long, env = "JOB_WATCH_TOKEN", default_value = "", hide_env_values = true)]
    pub token: String,

    /// Download URL offered when the log-file lookup fails
    #[arg(long)]
    pub log_default: Option<String>,

    /// UI language code (es, en)
    #[arg(long)]
    pub lang: Option<String>,

    /// Delay between polls in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Path to the RON config file (default: ./job-watch.ron if present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Expand the log panel and echo job logs as they arrive
    #[arg(long)]
    pub show_logs: bool,

    /// Where diagnostic logs go
    #[arg(long, value_enum, default_value_t = LogTo::File)]
    pub log_to: LogTo,

    /// Diagnostic log level (error, warn, info, debug, trace, off)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTo {
    File,
    Terminal,
    Both,
}

impl From<LogTo> for LogDestination {
    fn from(value: LogTo) -> Self {
        match value {
            LogTo::File => LogDestination::File,
            LogTo::Terminal => LogDestination::Terminal,
            LogTo::Both => LogDestination::Both,
        }
    }
}
