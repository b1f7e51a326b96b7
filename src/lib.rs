// facility-feed - PostgreSQL facility table to partner feed exporter
// Licensed under the MIT License

//! # facility-feed
//!
//! Exports every row of a PostgreSQL `facility` table as a partner entity
//! feed: gzip-compressed JSON feed files of bounded size plus a
//! `metadata.json` manifest, published to an S3 bucket.
//!
//! ## Overview
//!
//! - **Extracting** facilities page by page through a server-side cursor
//! - **Transforming** each row into a nested feed entity
//! - **Writing** one gzip feed file per page and a manifest per run
//! - **Publishing** files to S3 or an S3-compatible store
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (transform, feed files, publish, export)
//! - [`adapters`] - External integrations (PostgreSQL, object store)
//! - [`domain`] - Record shapes, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facility_feed::config::load_config;
//! use facility_feed::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("facility-feed.toml")?;
//!     let coordinator = ExportCoordinator::new(config).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} facilities", summary.total_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Transformation
//!
//! ```rust
//! use facility_feed::core::transform::transform_record;
//! use facility_feed::domain::RawFacility;
//!
//! let record = RawFacility {
//!     id: "42".to_string(),
//!     name: Some("Cafe".to_string()),
//!     phone: None,
//!     url: None,
//!     latitude: Some(1.5),
//!     longitude: Some(-2.25),
//!     country: Some("US".to_string()),
//!     locality: None,
//!     region: None,
//!     postal_code: None,
//!     street_address: None,
//! };
//!
//! let entity = transform_record(&record);
//! assert_eq!(entity.entity_id.as_str(), "dining-42");
//! assert_eq!(entity.location.address.country.as_deref(), Some("US"));
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error is
//! [`domain::FeedError`]:
//!
//! ```rust,no_run
//! use facility_feed::domain::FeedError;
//!
//! fn example() -> Result<(), FeedError> {
//!     let config = facility_feed::config::load_config("facility-feed.toml")?;
//!     println!("{}", config.database.describe());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
