//! Configuration schema types
//!
//! Maps one-to-one onto the TOML file. Every section except `[database]`
//! and `[storage]` has defaults and may be omitted.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration handed to the export coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Source database connection
    pub database: DatabaseConfig,

    /// Destination object store
    pub storage: StorageConfig,

    /// Local output settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Upload policy
    #[serde(default)]
    pub publish: PublishConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FeedConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid key
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.database.validate()?;
        self.storage.validate()?;
        self.export.validate()?;
        self.publish.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write files locally but skip every upload
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid application.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// PostgreSQL source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,

    /// Database port
    #[serde(default = "default_pg_port")]
    pub port: u16,

    /// Login role
    pub user: String,

    /// Login password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Database name
    pub database: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_pg_max_connections")]
    pub max_connections: usize,

    /// Connection and pool wait timeout in seconds
    #[serde(default = "default_pg_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,

    /// TLS mode: disable, prefer or require
    #[serde(default = "default_pg_ssl_mode")]
    pub ssl_mode: String,

    /// Rows fetched per cursor page; one page becomes one feed file
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("database.host cannot be empty".to_string());
        }

        if self.user.is_empty() {
            return Err("database.user cannot be empty".to_string());
        }

        if self.database.is_empty() {
            return Err("database.database cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("database.port must be > 0".to_string());
        }

        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(format!(
                "database.max_connections must be between 1 and 100, got {}",
                self.max_connections
            ));
        }

        let valid_ssl_modes = ["disable", "prefer", "require"];
        if !valid_ssl_modes.contains(&self.ssl_mode.as_str()) {
            return Err(format!(
                "database.ssl_mode must be one of: {}, got '{}'",
                valid_ssl_modes.join(", "),
                self.ssl_mode
            ));
        }

        if !(1..=10_000).contains(&self.page_size) {
            return Err(format!(
                "database.page_size must be between 1 and 10000, got {}",
                self.page_size
            ));
        }

        Ok(())
    }

    /// Host, port and database without credentials, for logs and summaries
    pub fn describe(&self) -> String {
        format!(
            "postgresql://***@{}:{}/{}",
            self.host, self.port, self.database
        )
    }
}

/// Object store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Destination bucket
    pub bucket: String,

    /// Region; falls back to the AWS environment/profile when absent
    #[serde(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Use path-style addressing (`endpoint/bucket/key`)
    #[serde(default)]
    pub force_path_style: bool,

    /// Static access key; the default credential chain is used when absent
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Static secret key, required together with `access_key_id`
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bucket.is_empty() {
            return Err("storage.bucket cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| format!("storage.endpoint is not a valid URL: {e}"))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err("storage.endpoint must start with http:// or https://".to_string());
            }
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(
                "storage.access_key_id and storage.secret_access_key must be set together"
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Local output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving feed files and metadata.json
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// Upload policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Retries per upload after the first attempt; 0 means a failed upload
    /// is logged and left behind
    #[serde(default)]
    pub max_retries: usize,

    /// Delay before each retry in milliseconds; the last entry repeats
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: Vec<u64>,

    /// Check every published key exists once the manifest is uploaded
    #[serde(default)]
    pub verify_uploads: bool,

    /// Send `Content-Encoding: gzip` on the manifest even though it is plain JSON
    #[serde(default = "default_true")]
    pub manifest_gzip_encoding: bool,
}

impl PublishConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err(format!(
                "publish.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }

        if self.max_retries > 0 && self.retry_backoff_ms.is_empty() {
            return Err(
                "publish.retry_backoff_ms cannot be empty when max_retries > 0".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            verify_uploads: false,
            manifest_gzip_encoding: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly or never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_max_connections() -> usize {
    4
}

fn default_pg_connection_timeout_seconds() -> u64 {
    30
}

fn default_pg_ssl_mode() -> String {
    "prefer".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_retry_backoff_ms() -> Vec<u64> {
    vec![1000, 2000, 4000]
}

fn default_local_path() -> String {
    "/var/log/facility-feed".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
