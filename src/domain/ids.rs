//! Published identifier types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain tag prepended to every source facility identifier
pub const ENTITY_ID_PREFIX: &str = "dining-";

/// Entity identifier as published in the feed
///
/// Serializes as a bare string, e.g. `"dining-42"`.
///
/// # Examples
///
/// ```
/// use facility_feed::domain::ids::EntityId;
///
/// let id = EntityId::from_facility_id("42");
/// assert_eq!(id.as_str(), "dining-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Builds the entity identifier for a source facility id
    pub fn from_facility_id(facility_id: &str) -> Self {
        Self(format!("{ENTITY_ID_PREFIX}{facility_id}"))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_prefix() {
        let id = EntityId::from_facility_id("1");
        assert_eq!(id.as_str(), "dining-1");
        assert_eq!(id.to_string(), "dining-1");
    }

    #[test]
    fn test_entity_id_passes_through_any_source_id() {
        // no validation: whatever the table holds is published verbatim
        let id = EntityId::from_facility_id("");
        assert_eq!(id.as_str(), "dining-");
    }

    #[test]
    fn test_entity_id_serializes_transparently() {
        let id = EntityId::from_facility_id("7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"dining-7\"");

        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
