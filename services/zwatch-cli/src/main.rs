//! ZWatch CLI
//!
//! Command-line front end for the ZWatch website-uptime monitor.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;
use zwatch_cli::prompt::{FixedConfirm, StdinConfirm};
use zwatch_cli::store::{default_path, FileStore};
use zwatch_cli::Command;
use zwatch_core::controller::Confirm;
use zwatch_core::io::ReqwestHttpClient;
use zwatch_core::{build_controller, load_config, ClientConfig};

#[derive(Parser)]
#[command(name = "zwatch")]
#[command(about = "Website uptime monitoring client")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Service base URL (overrides config file)
    #[arg(long)]
    api_base: Option<String>,

    /// Path to the credential file
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, api_base={:?}, credentials={:?}, log_level={:?}",
        args.config,
        args.api_base,
        args.credentials,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        ClientConfig::default()
    };

    if let Some(api_base) = &args.api_base {
        config = config.with_api_base(api_base);
    }

    let credentials = args.credentials.unwrap_or_else(default_path);
    tracing::debug!("Credential file: {:?}", credentials);

    let confirm: Arc<dyn Confirm> = match args.command {
        Command::Logout { yes: true } => Arc::new(FixedConfirm(true)),
        _ => Arc::new(StdinConfirm),
    };

    let controller = build_controller(
        config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileStore::new(credentials)),
        confirm,
    );

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let ok = zwatch_cli::run(&controller, &args.command, &mut stdout, &mut stderr).await?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
