//! Export coordinator - main orchestrator for the export process
//!
//! Wires the configured PostgreSQL source and object store into an
//! [`ExportPipeline`] and runs it once.

use crate::adapters::postgresql::PostgreSQLClient;
use crate::adapters::storage::S3ObjectStore;
use crate::config::FeedConfig;
use crate::core::export::pipeline::ExportPipeline;
use crate::core::export::summary::ExportSummary;
use crate::core::publish::{Publisher, RetryPolicy};
use crate::domain::Result;
use std::sync::Arc;

/// Export coordinator
pub struct ExportCoordinator {
    config: FeedConfig,
    database: PostgreSQLClient,
    pipeline: ExportPipeline,
}

impl ExportCoordinator {
    /// Connect to the source and build the publisher
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built, the connection test
    /// fails, or the object store client cannot be configured.
    pub async fn new(config: FeedConfig) -> Result<Self> {
        let database = PostgreSQLClient::new(&config.database)?;
        database.test_connection().await?;

        let store = build_store(&config).await?;
        let dry_run = config.application.dry_run;

        let publisher = Publisher::new(Arc::new(store), RetryPolicy::from_config(&config.publish))
            .with_manifest_gzip_encoding(config.publish.manifest_gzip_encoding)
            .with_dry_run(dry_run);

        let pipeline = ExportPipeline::new(&config.export.output_dir, publisher)
            .with_reconciliation(config.publish.verify_uploads);

        if dry_run {
            tracing::warn!("Dry run: feed files are written locally and not uploaded");
        }

        Ok(Self {
            config,
            database,
            pipeline,
        })
    }

    /// Execute the export
    ///
    /// Consumes the coordinator; the connection pool is closed before this
    /// returns, whether the run succeeded or not.
    pub async fn execute_export(self) -> Result<ExportSummary> {
        tracing::info!(
            source = %self.database.target(),
            bucket = %self.config.storage.bucket,
            page_size = self.config.database.page_size,
            output_dir = %self.pipeline.output_dir().display(),
            dry_run = self.config.application.dry_run,
            "Starting export"
        );

        let result = match self.database.open_cursor(self.config.database.page_size).await {
            Ok(cursor) => self.pipeline.run(cursor.into_stream()).await,
            Err(e) => Err(e),
        };

        self.database.close();

        let summary = result?;
        summary.log_summary();
        Ok(summary)
    }
}

/// Object store for the run; a dry run never needs AWS settings
async fn build_store(config: &FeedConfig) -> Result<S3ObjectStore> {
    if config.application.dry_run {
        Ok(S3ObjectStore::for_dry_run(&config.storage))
    } else {
        S3ObjectStore::new(&config.storage).await
    }
}
