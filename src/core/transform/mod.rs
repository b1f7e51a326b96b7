//! Facility record transformation
//!
//! Maps a [`RawFacility`] row onto the published [`FeedEntity`] schema. The
//! mapping is pure: no I/O, no defaulting, no validation. Null columns stay
//! null and the only renames are `id` -> `entity_id` (with the domain tag)
//! and `phone` -> `telephone`.

use crate::domain::facility::{EntityLocation, FeedEntity, PostalAddress, RawFacility};
use crate::domain::ids::EntityId;

/// Transform one source row into a feed entity
///
/// # Examples
///
/// ```
/// use facility_feed::core::transform::transform_record;
/// use facility_feed::domain::RawFacility;
///
/// let raw = RawFacility {
///     id: "1".to_string(),
///     name: Some("Test Facility".to_string()),
///     phone: Some("+123456789".to_string()),
///     url: None,
///     latitude: Some(40.7128),
///     longitude: Some(-74.0060),
///     country: Some("US".to_string()),
///     locality: None,
///     region: None,
///     postal_code: None,
///     street_address: None,
/// };
///
/// let entity = transform_record(&raw);
/// assert_eq!(entity.entity_id.as_str(), "dining-1");
/// assert_eq!(entity.telephone.as_deref(), Some("+123456789"));
/// ```
pub fn transform_record(record: &RawFacility) -> FeedEntity {
    FeedEntity {
        entity_id: EntityId::from_facility_id(&record.id),
        name: record.name.clone(),
        telephone: record.phone.clone(),
        url: record.url.clone(),
        location: EntityLocation {
            latitude: record.latitude,
            longitude: record.longitude,
            address: PostalAddress {
                country: record.country.clone(),
                locality: record.locality.clone(),
                region: record.region.clone(),
                postal_code: record.postal_code.clone(),
                street_address: record.street_address.clone(),
            },
        },
    }
}

/// Transform a batch, preserving order one-to-one
pub fn transform_batch(records: &[RawFacility]) -> Vec<FeedEntity> {
    records.iter().map(transform_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RawFacility {
        RawFacility {
            id: "1".to_string(),
            name: Some("Test Facility".to_string()),
            phone: Some("+123456789".to_string()),
            url: Some("http://test.com".to_string()),
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            country: Some("US".to_string()),
            locality: Some("New York".to_string()),
            region: Some("NY".to_string()),
            postal_code: Some("10001".to_string()),
            street_address: Some("123 Test St".to_string()),
        }
    }

    #[test]
    fn test_transform_reference_record() {
        let value = serde_json::to_value(transform_record(&sample())).unwrap();

        assert_eq!(
            value,
            json!({
                "entity_id": "dining-1",
                "name": "Test Facility",
                "telephone": "+123456789",
                "url": "http://test.com",
                "location": {
                    "latitude": 40.7128,
                    "longitude": -74.0060,
                    "address": {
                        "country": "US",
                        "locality": "New York",
                        "region": "NY",
                        "postal_code": "10001",
                        "street_address": "123 Test St"
                    }
                }
            })
        );
    }

    #[test]
    fn test_transform_keeps_nulls() {
        let mut raw = sample();
        raw.phone = None;
        raw.latitude = None;
        raw.postal_code = None;

        let entity = transform_record(&raw);
        assert!(entity.telephone.is_none());
        assert!(entity.location.latitude.is_none());
        assert!(entity.location.address.postal_code.is_none());
        assert_eq!(entity.location.longitude, Some(-74.0060));
    }

    #[test]
    fn test_transform_batch_preserves_order() {
        let batch: Vec<RawFacility> = (1..=5)
            .map(|i| RawFacility {
                id: i.to_string(),
                ..sample()
            })
            .collect();

        let ids: Vec<String> = transform_batch(&batch)
            .into_iter()
            .map(|e| e.entity_id.into_inner())
            .collect();
        assert_eq!(
            ids,
            vec!["dining-1", "dining-2", "dining-3", "dining-4", "dining-5"]
        );
    }

    #[test]
    fn test_transform_batch_empty() {
        assert!(transform_batch(&[]).is_empty());
    }
}
