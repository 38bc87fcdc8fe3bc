use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "SNIP_DATA_DIR";
pub const BASE_URL_ENV: &str = "SNIP_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "SNIP_LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = ".snip";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snip", about = "Shorten URLs and track their clicks")]
pub struct CLI {
    /// Directory holding the store snapshot and the id counter.
    #[arg(long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Prefix used to display short links.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a short link.
    Shorten {
        url: String,
        /// Use this token instead of a generated one.
        #[arg(long)]
        alias: Option<String>,
        /// Minutes until the link expires. Defaults to 30 days.
        #[arg(long, allow_negative_numbers = true)]
        ttl_minutes: Option<i64>,
    },
    /// Resolve a token as a visitor would, recording the click.
    Open {
        token: String,
        #[arg(long)]
        referrer: Option<String>,
        #[arg(long)]
        user_agent: Option<String>,
    },
    /// Show click statistics for one token, or for every link.
    Stats { token: Option<String> },
    /// Delete a link and its clicks.
    Remove { token: String },
    /// Delete every link and click.
    Clear,
    /// Create sample links with simulated visits.
    Seed,
}
