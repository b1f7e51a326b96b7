//! Upload of feed files and the manifest
//!
//! [`Publisher`] puts written files into the configured [`ObjectStore`] under
//! their file names. Failures are reported as [`UploadOutcome::Failed`] and
//! never abort the run; the caller decides what a failure means for the exit
//! status.

use crate::adapters::storage::{ObjectHeaders, ObjectStore};
use crate::config::PublishConfig;
use crate::core::feed::WrittenFile;
use crate::log_retry_attempt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Upload retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,

    /// Delay before each retry; the last entry repeats
    pub backoff: Vec<Duration>,
}

impl RetryPolicy {
    /// One attempt, no retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Vec::new(),
        }
    }

    pub fn from_config(config: &PublishConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: config
                .retry_backoff_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: usize) -> Duration {
        self.backoff
            .get(retry.saturating_sub(1))
            .or_else(|| self.backoff.last())
            .copied()
            .unwrap_or_default()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Result of publishing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The store accepted the file
    Uploaded { attempts: usize },

    /// Dry run, nothing was sent
    Skipped,

    /// Every attempt failed; `error` is the last failure
    Failed { attempts: usize, error: String },
}

impl UploadOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, UploadOutcome::Failed { .. })
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }
}

/// Publishes written files to an object store
#[derive(Clone)]
pub struct Publisher {
    store: Arc<dyn ObjectStore>,
    retry: RetryPolicy,
    manifest_gzip_encoding: bool,
    dry_run: bool,
}

impl Publisher {
    pub fn new(store: Arc<dyn ObjectStore>, retry: RetryPolicy) -> Self {
        Self {
            store,
            retry,
            manifest_gzip_encoding: true,
            dry_run: false,
        }
    }

    /// Whether the manifest is labelled `Content-Encoding: gzip`
    ///
    /// The manifest body is plain JSON either way; the label is kept by
    /// default because existing consumers of the bucket expect it.
    pub fn with_manifest_gzip_encoding(mut self, enabled: bool) -> Self {
        self.manifest_gzip_encoding = enabled;
        self
    }

    /// Skip every upload
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Upload a feed file with JSON + gzip headers
    pub async fn publish_feed(&self, file: &WrittenFile) -> UploadOutcome {
        self.upload(&file.path, &file.name, &ObjectHeaders::gzip_json())
            .await
    }

    /// Upload the manifest
    pub async fn publish_manifest(&self, file: &WrittenFile) -> UploadOutcome {
        let headers = if self.manifest_gzip_encoding {
            ObjectHeaders::gzip_json()
        } else {
            ObjectHeaders::plain_json()
        };
        self.upload(&file.path, &file.name, &headers).await
    }

    /// Upload `path` under `key`, retrying per the policy
    pub async fn upload(&self, path: &Path, key: &str, headers: &ObjectHeaders) -> UploadOutcome {
        let location = self.store.describe(key);

        if self.dry_run {
            tracing::info!(
                path = %path.display(),
                destination = %location,
                "Dry run: upload skipped"
            );
            return UploadOutcome::Skipped;
        }

        let max_attempts = self.retry.max_retries + 1;
        let mut attempt = 1;
        loop {
            match self.store.put_file(path, key, headers).await {
                Ok(()) => {
                    tracing::info!(
                        path = %path.display(),
                        destination = %location,
                        attempts = attempt,
                        "Uploaded"
                    );
                    return UploadOutcome::Uploaded { attempts: attempt };
                }
                Err(e) if attempt < max_attempts => {
                    log_retry_attempt!(attempt + 1, max_attempts, e);
                    tokio::time::sleep(self.retry.delay_for(attempt)).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        path = %path.display(),
                        destination = %location,
                        attempts = attempt,
                        error = %e,
                        "Upload failed"
                    );
                    return UploadOutcome::Failed {
                        attempts: attempt,
                        error: e.to_string(),
                    };
                }
            }
        }
    }
}
