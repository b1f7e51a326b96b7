//! PostgreSQL facility source
//!
//! Reads the `facility` table in fixed-size pages through a server-side
//! cursor and yields them as a [`BatchStream`].

pub mod client;
pub mod cursor;
pub mod models;

pub use client::PostgreSQLClient;
pub use cursor::{BatchStream, FacilityCursor};
pub use models::{facility_from_row, FACILITY_QUERY};
