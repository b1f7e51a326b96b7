//! Post-publish reconciliation
//!
//! Checks that every key a run claims to have published exists in the store.

use super::report::ReconciliationReport;
use crate::adapters::storage::ObjectStore;
use crate::core::feed::{Manifest, MANIFEST_FILE_NAME};
use std::sync::Arc;
use std::time::Instant;

/// Checks manifest entries against the object store
pub struct Reconciler {
    store: Arc<dyn ObjectStore>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Check every `data_file` entry of `manifest`, then the manifest key
    pub async fn reconcile_manifest(&self, manifest: &Manifest) -> ReconciliationReport {
        let keys: Vec<&str> = manifest
            .data_file
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(MANIFEST_FILE_NAME))
            .collect();
        self.reconcile_keys(&keys).await
    }

    pub async fn reconcile_keys(&self, keys: &[&str]) -> ReconciliationReport {
        let start = Instant::now();
        let mut report = ReconciliationReport::new();

        tracing::info!(keys = keys.len(), "Starting reconciliation");

        for key in keys {
            match self.store.exists(key).await {
                Ok(true) => report.record_present(),
                Ok(false) => {
                    tracing::warn!(destination = %self.store.describe(key), "Published object missing");
                    report.record_missing(key);
                }
                Err(e) => {
                    tracing::warn!(
                        destination = %self.store.describe(key),
                        error = %e,
                        "Could not check published object"
                    );
                    report.record_failure(key, e.to_string());
                }
            }
        }

        report.set_duration(start.elapsed().as_millis() as u64);

        tracing::info!(
            checked = report.checked,
            present = report.present,
            missing = report.missing.len(),
            unchecked = report.failures.len(),
            "Reconciliation completed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::ObjectHeaders;
    use crate::domain::{Result, StorageError};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::Path;

    struct FixedStore {
        keys: HashSet<String>,
        broken: Option<String>,
    }

    #[async_trait]
    impl ObjectStore for FixedStore {
        async fn put_file(&self, _path: &Path, _key: &str, _headers: &ObjectHeaders) -> Result<()> {
            Ok(())
        }

        async fn exists(&self, key: &str) -> Result<bool> {
            if self.broken.as_deref() == Some(key) {
                return Err(StorageError::HeadFailed {
                    key: key.to_string(),
                    message: "403 Forbidden".to_string(),
                }
                .into());
            }
            Ok(self.keys.contains(key))
        }

        fn describe(&self, key: &str) -> String {
            format!("mem://test/{key}")
        }
    }

    fn store(keys: &[&str], broken: Option<&str>) -> Arc<dyn ObjectStore> {
        Arc::new(FixedStore {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            broken: broken.map(str::to_string),
        })
    }

    fn manifest() -> Manifest {
        Manifest::new(
            10,
            vec![
                "facility_feed_1.json.gz".to_string(),
                "facility_feed_2.json.gz".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_all_present() {
        let reconciler = Reconciler::new(store(
            &["facility_feed_1.json.gz", "facility_feed_2.json.gz", "metadata.json"],
            None,
        ));
        let report = reconciler.reconcile_manifest(&manifest()).await;
        assert_eq!(report.checked, 3);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_missing_feed_file() {
        let reconciler = Reconciler::new(store(&["facility_feed_1.json.gz", "metadata.json"], None));
        let report = reconciler.reconcile_manifest(&manifest()).await;
        assert_eq!(report.missing, vec!["facility_feed_2.json.gz".to_string()]);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn test_head_failure_is_recorded() {
        let reconciler = Reconciler::new(store(
            &["facility_feed_1.json.gz", "facility_feed_2.json.gz"],
            Some("metadata.json"),
        ));
        let report = reconciler.reconcile_manifest(&manifest()).await;
        assert_eq!(report.present, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "metadata.json");
    }
}
