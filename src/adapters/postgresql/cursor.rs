//! Paged reads over the facility table
//!
//! A `NO SCROLL` cursor inside a read-only transaction. Each fetch returns at
//! most `page_size` rows; the first empty fetch closes the cursor and commits.

use super::models::{facility_from_row, FACILITY_QUERY};
use crate::domain::{DatabaseError, RawFacility, Result};
use futures::stream::{self, Stream};
use std::pin::Pin;

const CURSOR_NAME: &str = "facility_feed_cursor";

/// Ordered sequence of non-empty facility batches
pub type BatchStream = Pin<Box<dyn Stream<Item = Result<Vec<RawFacility>>> + Send>>;

/// Open cursor holding one pooled connection
pub struct FacilityCursor {
    client: deadpool_postgres::Object,
    fetch_sql: String,
    exhausted: bool,
    batches: usize,
}

impl FacilityCursor {
    pub(crate) async fn open(client: deadpool_postgres::Object, page_size: usize) -> Result<Self> {
        client
            .batch_execute(&format!(
                "BEGIN READ ONLY; DECLARE {CURSOR_NAME} NO SCROLL CURSOR FOR {FACILITY_QUERY}"
            ))
            .await
            .map_err(|e| DatabaseError::CursorFailed(format!("Failed to declare cursor: {e}")))?;

        tracing::debug!(page_size, "Facility cursor opened");

        Ok(Self {
            client,
            fetch_sql: fetch_statement(page_size),
            exhausted: false,
            batches: 0,
        })
    }

    /// Fetch the next page, `None` once the table is exhausted
    pub async fn next_batch(&mut self) -> Result<Option<Vec<RawFacility>>> {
        if self.exhausted {
            return Ok(None);
        }

        let rows = self
            .client
            .query(self.fetch_sql.as_str(), &[])
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows.is_empty() {
            self.finish().await?;
            return Ok(None);
        }

        let batch = rows
            .iter()
            .map(facility_from_row)
            .collect::<Result<Vec<_>>>()?;
        self.batches += 1;

        tracing::debug!(batch = self.batches, rows = batch.len(), "Fetched facility batch");
        Ok(Some(batch))
    }

    async fn finish(&mut self) -> Result<()> {
        self.exhausted = true;
        self.client
            .batch_execute(&format!("CLOSE {CURSOR_NAME}; COMMIT"))
            .await
            .map_err(|e| DatabaseError::CursorFailed(format!("Failed to close cursor: {e}")))?;
        tracing::debug!(batches = self.batches, "Facility cursor exhausted");
        Ok(())
    }

    /// Turn the cursor into a [`BatchStream`]
    pub fn into_stream(self) -> BatchStream {
        Box::pin(stream::try_unfold(self, |mut cursor| async move {
            cursor
                .next_batch()
                .await
                .map(|batch| batch.map(|rows| (rows, cursor)))
        }))
    }
}

fn fetch_statement(page_size: usize) -> String {
    format!("FETCH FORWARD {page_size} FROM {CURSOR_NAME}")
}
