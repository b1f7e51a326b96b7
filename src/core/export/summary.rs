//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::feed::WrittenFile;
use crate::core::publish::UploadOutcome;
use crate::core::verification::ReconciliationReport;
use std::time::Duration;

/// A written file and what happened when it was published
#[derive(Debug, Clone)]
pub struct PublishedFile {
    pub file: WrittenFile,
    pub outcome: UploadOutcome,
}

impl PublishedFile {
    pub fn new(file: WrittenFile, outcome: UploadOutcome) -> Self {
        Self { file, outcome }
    }
}

/// Summary of an export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Non-empty batches fetched from the source
    pub batches: usize,

    /// Records written across all feed files
    pub total_records: usize,

    /// Feed files in production order
    pub feed_files: Vec<PublishedFile>,

    /// The manifest, once written
    pub manifest: Option<PublishedFile>,

    /// Uploads were skipped
    pub dry_run: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,

    /// Reconciliation report, if reconciliation ran
    pub reconciliation: Option<ReconciliationReport>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            batches: 0,
            total_records: 0,
            feed_files: Vec::new(),
            manifest: None,
            dry_run,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            reconciliation: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Record a published feed file
    ///
    /// A failed upload is also recorded as an [`ExportErrorType::Upload`]
    /// error.
    pub fn record_feed_file(&mut self, published: PublishedFile) {
        self.batches += 1;
        self.total_records += published.file.records;
        self.record_upload_error(&published);
        self.feed_files.push(published);
    }

    /// Record the published manifest
    pub fn record_manifest(&mut self, published: PublishedFile) {
        self.record_upload_error(&published);
        self.manifest = Some(published);
    }

    /// Set the reconciliation report
    ///
    /// Missing or unchecked keys are also recorded as
    /// [`ExportErrorType::Reconciliation`] errors.
    pub fn set_reconciliation(&mut self, report: ReconciliationReport) {
        for key in &report.missing {
            self.add_error(
                ExportError::new(
                    ExportErrorType::Reconciliation,
                    "Published object missing".to_string(),
                )
                .with_context(key.clone()),
            );
        }
        for failure in &report.failures {
            self.add_error(
                ExportError::new(ExportErrorType::Reconciliation, failure.reason.clone())
                    .with_context(failure.key.clone()),
            );
        }
        self.reconciliation = Some(report);
    }

    fn record_upload_error(&mut self, published: &PublishedFile) {
        if let UploadOutcome::Failed { error, .. } = &published.outcome {
            self.add_error(
                ExportError::new(ExportErrorType::Upload, error.clone())
                    .with_context(published.file.name.clone()),
            );
        }
    }

    /// Feed file names in production order, as listed in the manifest
    pub fn feed_file_names(&self) -> Vec<String> {
        self.feed_files.iter().map(|f| f.file.name.clone()).collect()
    }

    /// Number of files, manifest included, whose upload failed
    pub fn upload_failures(&self) -> usize {
        self.feed_files
            .iter()
            .chain(self.manifest.iter())
            .filter(|f| f.outcome.is_failed())
            .count()
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            batches = self.batches,
            records = self.total_records,
            feed_files = self.feed_files.len(),
            upload_failures = self.upload_failures(),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Export error"
                );
            }
        }
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Type of export error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportErrorType {
    /// Upload to the object store failed
    Upload,
    /// A published key is missing or could not be checked
    Reconciliation,
}

/// Export error with context
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (the remote key)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
