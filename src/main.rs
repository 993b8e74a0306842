//! Audit extractor - Main entry point

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use aapaudit::config::defaults;
use aapaudit::controller::preflight;
use aapaudit::{
    run_extraction, Cli, ControllerClient, ExtractContext, PasswordResolver, ResourceKind, Result,
    RunLog,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting audit extractor v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        // Some resources failed but the run itself completed
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    debug!(
        "CLI args: host={}, port={}, username={}, page_size={}, resources={:?}, results_dir={}",
        cli.host, cli.port, cli.username, cli.page_size, cli.resources, cli.results_dir
    );

    // Validate the resource list before touching the network
    let kinds: Vec<ResourceKind> = match &cli.resources {
        Some(names) => names
            .iter()
            .map(|name| ResourceKind::from_str(name.trim()))
            .collect::<Result<_>>()?,
        None => ResourceKind::ALL.to_vec(),
    };

    // Resolve password with fallback logic
    let password_resolver = PasswordResolver::new(&cli.host);
    let password = password_resolver.resolve(cli.password.as_deref())?;

    let client = ControllerClient::new(
        cli.host.clone(),
        cli.port,
        cli.username.clone(),
        password,
        cli.insecure,
    )?;

    // Preflight: reachability, then authentication
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Checking {}:{}...", cli.host, cli.port));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let preflight_result = async {
        preflight::check_reachable(&cli.host, cli.port).await?;
        preflight::check_auth(&client).await
    }
    .await;
    spinner.finish_and_clear();
    let identity = preflight_result?;

    info!("Authenticated as '{}'", identity.username);
    if !identity.is_privileged() {
        warn!(
            "User '{}' is neither a superuser nor a system auditor; reports may be incomplete",
            identity.username
        );
    }

    let results_dir = PathBuf::from(&cli.results_dir);
    std::fs::create_dir_all(&results_dir)?;
    let log_path = match &cli.log_file {
        Some(path) => PathBuf::from(path),
        None => results_dir.join(defaults::LOG_FILE_NAME),
    };
    let mut log = RunLog::create(&log_path)?;

    let ctx = ExtractContext {
        page_size: cli.page_size,
        resolve_org_names: cli.resolve_org_names,
    };
    run_extraction(&client, &kinds, &ctx, &results_dir, &mut log).await
}
