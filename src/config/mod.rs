//! Configuration management.
//!
//! TOML configuration with `${VAR}` substitution, `FEED_*` environment
//! overrides and validation on load.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`DatabaseConfig`] - PostgreSQL source connection and page size
//! - [`StorageConfig`] - Destination bucket and S3 client settings
//! - [`ExportConfig`] - Local output directory
//! - [`PublishConfig`] - Retry policy, reconciliation, manifest headers
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [database]
//! host = "db.internal"
//! user = "feed"
//! password = "${FEED_DB_PASSWORD}"
//! database = "facilities"
//!
//! [storage]
//! bucket = "partner-feeds"
//! region = "us-east-1"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseConfig, ExportConfig, FeedConfig, LoggingConfig, PublishConfig,
    StorageConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
