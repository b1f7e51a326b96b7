// facility-feed - PostgreSQL facility table to partner feed exporter
// Licensed under the MIT License

use clap::Parser;
use facility_feed::cli::{Cli, Commands};
use facility_feed::config::{load_config, FeedConfig};
use facility_feed::domain::Result;
use facility_feed::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Loaded once; a broken config is reported by the command itself
    let loaded = match &cli.command {
        Commands::Init(_) => None,
        _ => Some(load_config(&cli.config)),
    };
    let config = loaded.as_ref().and_then(|result| result.as_ref().ok());
    let logging_config = config.map(|c| c.logging.clone()).unwrap_or_default();
    let log_level = cli.resolve_log_level(config);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "facility-feed");

    let exit_code = tokio::select! {
        result = execute_command(&cli, loaded) => match result {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Command execution failed");
                eprintln!("Error: {e}");
                5
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Received SIGINT (Ctrl+C), aborting");
            130
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

async fn execute_command(cli: &Cli, loaded: Option<Result<FeedConfig>>) -> anyhow::Result<i32> {
    let config = || loaded.unwrap_or_else(|| load_config(&cli.config));
    match &cli.command {
        Commands::Export(args) => args.execute(config()).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config, config()).await,
        Commands::Init(args) => args.execute().await,
    }
}
