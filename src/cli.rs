//! CLI argument parsing

use clap::Parser;

use crate::config::{api, defaults};

/// Automation controller audit extractor CLI
#[derive(Parser, Debug)]
#[command(name = "aapaudit")]
#[command(version)]
#[command(about = "Extract audit reports from an automation controller", long_about = None)]
pub struct Cli {
    /// Controller hostname (without scheme)
    #[arg(short = 'H', long)]
    pub host: String,

    /// Controller HTTPS port
    #[arg(short = 'P', long, default_value_t = defaults::PORT)]
    pub port: u16,

    /// Username to authenticate as
    #[arg(short, long, env = "AAP_USERNAME")]
    pub username: String,

    /// Password (overrides env vars and credentials file)
    #[arg(short, long, env = "AAP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Page size for API requests (1-200)
    #[arg(
        long,
        default_value_t = api::DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=api::MAX_PAGE_SIZE as i64)
    )]
    pub page_size: u32,

    /// Resources to extract, comma-separated (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub resources: Option<Vec<String>>,

    /// Directory for generated report files
    #[arg(short = 'o', long, default_value = defaults::RESULTS_DIR)]
    pub results_dir: String,

    /// Run log path (default: <results-dir>/run.log)
    #[arg(long)]
    pub log_file: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, default_value_t = false)]
    pub insecure: bool,

    /// Resolve organization names on host rows (one extra request per host)
    #[arg(long, default_value_t = false)]
    pub resolve_org_names: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,
}
