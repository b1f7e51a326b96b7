//! Row decoding for the facility table

use crate::domain::{FeedError, RawFacility, Result};
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;

/// Columns selected from the facility table, in `SELECT` order
pub const FACILITY_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "phone",
    "url",
    "latitude",
    "longitude",
    "country",
    "locality",
    "region",
    "postal_code",
    "street_address",
];

/// Source query
///
/// `id` is cast to text and coordinates to float8 so that integer, uuid or
/// numeric columns decode the same way.
pub const FACILITY_QUERY: &str = "SELECT id::text AS id, name, phone, url, \
     latitude::float8 AS latitude, longitude::float8 AS longitude, \
     country, locality, region, postal_code, street_address \
     FROM facility";

/// Decode one row into a [`RawFacility`]
///
/// # Errors
///
/// Returns [`FeedError::Transform`] when a column is missing, has an
/// unexpected type, or `id` is NULL.
pub fn facility_from_row(row: &Row) -> Result<RawFacility> {
    let id: Option<String> = column(row, "id")?;
    let id = id.ok_or_else(|| FeedError::Transform("facility row has NULL id".to_string()))?;

    Ok(RawFacility {
        id,
        name: column(row, "name")?,
        phone: column(row, "phone")?,
        url: column(row, "url")?,
        latitude: column(row, "latitude")?,
        longitude: column(row, "longitude")?,
        country: column(row, "country")?,
        locality: column(row, "locality")?,
        region: column(row, "region")?,
        postal_code: column(row, "postal_code")?,
        street_address: column(row, "street_address")?,
    })
}

fn column<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| FeedError::Transform(format!("column {name}: {e}")))
}
