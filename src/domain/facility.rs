//! Facility record shapes
//!
//! [`RawFacility`] is one row of the `facility` table as read by the record
//! source. [`FeedEntity`] is the externally published schema. Field order in
//! the published structs is the serialized key order.

use super::ids::EntityId;
use serde::{Deserialize, Serialize};

/// One row of the source `facility` table
///
/// Every column except `id` is nullable in the source and passes through
/// to the feed unchanged, `None` included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFacility {
    /// Source identifier, read as text
    pub id: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub street_address: Option<String>,
}

/// One published facility entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntity {
    pub entity_id: EntityId,
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub url: Option<String>,
    pub location: EntityLocation,
}

/// Geographic location of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: PostalAddress,
}

/// Postal address of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub country: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub street_address: Option<String>,
}
