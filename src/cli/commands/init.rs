//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "facility-feed.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, sample_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set FEED_DB_PASSWORD in the environment or a .env file");
                println!("  3. Validate configuration: facility-feed validate-config");
                println!("  4. Run export: facility-feed export --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

/// Sample configuration written by `init`
pub fn sample_config() -> &'static str {
    r#"# facility-feed configuration
# ${VAR} references are resolved from the environment (and .env).
# Any key can be overridden with FEED_<SECTION>_<KEY>, e.g. FEED_DATABASE_HOST.

[application]
log_level = "info"
dry_run = false

[database]
host = "localhost"
port = 5432
user = "feed"
password = "${FEED_DB_PASSWORD}"
database = "facilities"
max_connections = 4
connection_timeout_seconds = 30
ssl_mode = "prefer"   # disable | prefer | require
page_size = 100       # records per feed file

[storage]
bucket = "partner-feeds"
region = "us-east-1"
# endpoint = "http://localhost:9000"   # S3-compatible stores
# force_path_style = true
# access_key_id = "${FEED_S3_ACCESS_KEY_ID}"
# secret_access_key = "${FEED_S3_SECRET_ACCESS_KEY}"

[export]
output_dir = "./out"

[publish]
max_retries = 0
retry_backoff_ms = [1000, 2000, 4000]
verify_uploads = false
manifest_gzip_encoding = true

[logging]
local_enabled = false
local_path = "/var/log/facility-feed"
local_rotation = "daily"   # daily | hourly | never
"#
}
