//! CLI interface and argument parsing

pub mod commands;

use crate::config::FeedConfig;
use clap::{Parser, Subcommand};

/// Export the facility table as a partner entity feed
#[derive(Parser, Debug)]
#[command(name = "facility-feed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "facility-feed.toml", env = "FEED_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FEED_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// `--log-level`, else `application.log_level` from the config, else `info`
    pub fn resolve_log_level(&self, config: Option<&FeedConfig>) -> String {
        self.log_level
            .clone()
            .or_else(|| config.map(|c| c.application.log_level.clone()))
            .unwrap_or_else(|| "info".to_string())
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the facility table and publish feed files and the manifest
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
