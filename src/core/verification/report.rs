//! Reconciliation report structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of checking published keys against the object store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// When the check ran
    pub checked_at: DateTime<Utc>,

    /// Keys checked
    pub checked: usize,

    /// Keys found in the store
    pub present: usize,

    /// Keys the store does not have
    pub missing: Vec<String>,

    /// Keys whose existence could not be determined
    pub failures: Vec<ReconciliationFailure>,

    /// Duration of the check in milliseconds
    pub duration_ms: u64,
}

/// A key that could not be checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationFailure {
    pub key: String,
    pub reason: String,
}

impl ReconciliationReport {
    pub fn new() -> Self {
        Self {
            checked_at: Utc::now(),
            checked: 0,
            present: 0,
            missing: Vec::new(),
            failures: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn record_present(&mut self) {
        self.checked += 1;
        self.present += 1;
    }

    pub fn record_missing(&mut self, key: &str) {
        self.checked += 1;
        self.missing.push(key.to_string());
    }

    pub fn record_failure(&mut self, key: &str, reason: String) {
        self.checked += 1;
        self.failures.push(ReconciliationFailure {
            key: key.to_string(),
            reason,
        });
    }

    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    /// Every checked key is present
    pub fn is_success(&self) -> bool {
        self.missing.is_empty() && self.failures.is_empty()
    }

    /// Format the report as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Reconciliation Report\n");
        summary.push_str(&format!("  Checked at: {}\n", self.checked_at));
        summary.push_str(&format!("  Duration: {} ms\n", self.duration_ms));
        summary.push_str(&format!("  Keys checked: {}\n", self.checked));
        summary.push_str(&format!("  Present: {}\n", self.present));
        summary.push_str(&format!("  Missing: {}\n", self.missing.len()));

        for key in &self.missing {
            summary.push_str(&format!("    - {key}\n"));
        }

        if !self.failures.is_empty() {
            summary.push_str(&format!("  Unchecked: {}\n", self.failures.len()));
            for failure in &self.failures {
                summary.push_str(&format!("    - {}: {}\n", failure.key, failure.reason));
            }
        }

        summary
    }
}

impl Default for ReconciliationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_success() {
        let report = ReconciliationReport::new();
        assert_eq!(report.checked, 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_missing_key_fails() {
        let mut report = ReconciliationReport::new();
        report.record_present();
        report.record_missing("facility_feed_2.json.gz");

        assert_eq!(report.checked, 2);
        assert_eq!(report.present, 1);
        assert!(!report.is_success());
        assert!(report
            .format_summary()
            .contains("- facility_feed_2.json.gz"));
    }

    #[test]
    fn test_unchecked_key_fails() {
        let mut report = ReconciliationReport::new();
        report.record_failure("metadata.json", "403 Forbidden".to_string());

        assert!(!report.is_success());
        assert!(report.format_summary().contains("metadata.json: 403 Forbidden"));
    }
}
