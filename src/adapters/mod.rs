//! External system integrations.
//!
//! - [`postgresql`] - the facility table, read through a paged cursor
//! - [`storage`] - the object store feed files are published to
//!
//! # Design Pattern
//!
//! Adapters isolate driver and SDK types from the core. The export pipeline
//! only sees a [`BatchStream`](postgresql::BatchStream) of raw records and an
//! [`ObjectStore`](storage::ObjectStore), so tests can substitute both.
//!
//! ```rust,no_run
//! use facility_feed::adapters::postgresql::PostgreSQLClient;
//! use facility_feed::config::load_config;
//! use futures::TryStreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("facility-feed.toml")?;
//! let client = PostgreSQLClient::new(&config.database)?;
//! let mut batches = client.open_cursor(config.database.page_size).await?.into_stream();
//! while let Some(batch) = batches.try_next().await? {
//!     println!("{} facilities", batch.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod postgresql;
pub mod storage;
