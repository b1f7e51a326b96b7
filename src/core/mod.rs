//! Core business logic.
//!
//! # Modules
//!
//! - [`transform`] - source record to feed entity mapping
//! - [`feed`] - feed file and manifest writers
//! - [`publish`] - uploads with retry
//! - [`export`] - the export pipeline and its coordinator
//! - [`verification`] - post-publish reconciliation
//!
//! # Export Workflow
//!
//! 1. **Connect**: build the pool and test the connection
//! 2. **Fetch**: read the facility table in pages through a cursor
//! 3. **Transform**: map each record to a feed entity
//! 4. **Write**: one gzip feed file per batch
//! 5. **Publish**: upload each feed file as it is written
//! 6. **Manifest**: write and upload `metadata.json` listing every feed file
//! 7. **Reconcile** (optional): check every published key exists
//!
//! # Example
//!
//! ```rust,no_run
//! use facility_feed::config::load_config;
//! use facility_feed::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("facility-feed.toml")?;
//! let coordinator = ExportCoordinator::new(config).await?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Feed files: {}", summary.feed_files.len());
//! println!("Records: {}", summary.total_records);
//! println!("Upload failures: {}", summary.upload_failures());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod feed;
pub mod publish;
pub mod transform;
pub mod verification;
