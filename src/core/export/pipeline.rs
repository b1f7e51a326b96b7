//! The per-run export loop
//!
//! For each batch from the source: transform, write a feed file, publish it.
//! After the last batch: write the manifest, publish it, and optionally
//! reconcile. A fetch or write failure ends the run before the manifest is
//! written; an upload failure is recorded and the run continues.

use crate::adapters::postgresql::BatchStream;
use crate::core::export::summary::{ExportSummary, PublishedFile};
use crate::core::feed::{write_feed_file, write_manifest, FeedFileNamer, Manifest};
use crate::core::publish::Publisher;
use crate::core::transform::transform_batch;
use crate::core::verification::Reconciler;
use crate::domain::{FeedError, RawFacility, Result};
use crate::{log_batch_processing, log_error_with_context};
use futures::TryStreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Source of UNIX-second timestamps for file names and the manifest
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Wall clock in UNIX seconds
pub fn system_clock() -> Clock {
    Arc::new(|| chrono::Utc::now().timestamp())
}

/// Runs one export over a batch stream
pub struct ExportPipeline {
    output_dir: PathBuf,
    publisher: Publisher,
    clock: Clock,
    reconcile: bool,
}

impl ExportPipeline {
    pub fn new(output_dir: impl Into<PathBuf>, publisher: Publisher) -> Self {
        Self {
            output_dir: output_dir.into(),
            publisher,
            clock: system_clock(),
            reconcile: false,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Check published keys after the manifest upload; ignored in dry run
    pub fn with_reconciliation(mut self, enabled: bool) -> Self {
        self.reconcile = enabled;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run the export to completion
    ///
    /// # Errors
    ///
    /// Returns the first fetch, transform or write error. No manifest is
    /// written in that case.
    pub async fn run(&self, mut batches: BatchStream) -> Result<ExportSummary> {
        let start = Instant::now();

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            FeedError::Io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let mut summary = ExportSummary::new(self.publisher.is_dry_run());
        let mut namer = FeedFileNamer::new();

        while let Some(batch) = next_batch(&mut batches).await? {
            let entities = transform_batch(&batch);
            let name = namer.next_name((self.clock)());
            log_batch_processing!(summary.batches + 1, entities.len(), name);

            let written = write_feed_file(&self.output_dir, &name, &entities).map_err(|e| {
                log_error_with_context!(&e, "writing feed file");
                e
            })?;
            let outcome = self.publisher.publish_feed(&written).await;
            summary.record_feed_file(PublishedFile::new(written, outcome));
        }

        let manifest = Manifest::new((self.clock)(), summary.feed_file_names());
        let written = write_manifest(&self.output_dir, &manifest).map_err(|e| {
            log_error_with_context!(&e, "writing manifest");
            e
        })?;
        let outcome = self.publisher.publish_manifest(&written).await;
        summary.record_manifest(PublishedFile::new(written, outcome));

        if self.reconcile && !self.publisher.is_dry_run() {
            let report = Reconciler::new(self.publisher.store().clone())
                .reconcile_manifest(&manifest)
                .await;
            summary.set_reconciliation(report);
        }

        Ok(summary.with_duration(start.elapsed()))
    }
}

/// Next non-empty batch; `None` only once the stream is exhausted
async fn next_batch(batches: &mut BatchStream) -> Result<Option<Vec<RawFacility>>> {
    loop {
        match batches.try_next().await {
            Ok(Some(batch)) if batch.is_empty() => {
                tracing::debug!("Skipping empty batch");
            }
            Ok(batch) => return Ok(batch),
            Err(e) => {
                log_error_with_context!(&e, "fetching batch");
                return Err(e);
            }
        }
    }
}
