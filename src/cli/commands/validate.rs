//! Validate config command implementation
//!
//! Loads and validates the configuration, then prints a summary with
//! credentials masked.

use crate::config::FeedConfig;
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config_path: &str,
        loaded: Result<FeedConfig>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates after substitution and overrides
        let config = match loaded {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        print!("{}", describe_config(&config));
        println!();
        Ok(0)
    }
}

fn describe_config(config: &FeedConfig) -> String {
    let mut out = String::from("Configuration Summary:\n");
    out.push_str(&format!("  Log Level: {}\n", config.application.log_level));
    out.push_str(&format!("  Dry Run: {}\n", config.application.dry_run));
    out.push_str(&format!("  Source: {}\n", config.database.describe()));
    out.push_str(&format!("  SSL Mode: {}\n", config.database.ssl_mode));
    out.push_str(&format!("  Page Size: {}\n", config.database.page_size));
    out.push_str(&format!("  Bucket: {}\n", config.storage.bucket));
    out.push_str(&format!(
        "  Region: {}\n",
        config.storage.region.as_deref().unwrap_or("(from environment)")
    ));
    if let Some(endpoint) = &config.storage.endpoint {
        out.push_str(&format!("  Endpoint: {endpoint}\n"));
    }
    out.push_str(&format!(
        "  Credentials: {}\n",
        if config.storage.access_key_id.is_some() {
            "static (***)"
        } else {
            "default chain"
        }
    ));
    out.push_str(&format!("  Output Dir: {}\n", config.export.output_dir));
    out.push_str(&format!("  Upload Retries: {}\n", config.publish.max_retries));
    out.push_str(&format!(
        "  Verify Uploads: {}\n",
        config.publish.verify_uploads
    ));
    out
}
