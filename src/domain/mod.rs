//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Record shapes** ([`RawFacility`] as read, [`FeedEntity`] as published)
//! - **Identifiers** ([`EntityId`])
//! - **Error types** ([`FeedError`], [`DatabaseError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FeedError>`]:
//!
//! ```rust,no_run
//! use facility_feed::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = facility_feed::config::load_config("facility-feed.toml")?;
//!     println!("bucket: {}", config.storage.bucket);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod facility;
pub mod ids;
pub mod result;

pub use errors::{DatabaseError, FeedError, StorageError};
pub use facility::{EntityLocation, FeedEntity, PostalAddress, RawFacility};
pub use ids::{EntityId, ENTITY_ID_PREFIX};
pub use result::Result;
