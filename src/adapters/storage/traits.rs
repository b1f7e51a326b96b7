//! Object store abstraction
//!
//! The publisher talks to the remote store only through [`ObjectStore`], so
//! the export pipeline can run against S3, an S3-compatible service, or an
//! in-memory fake in tests.

use crate::domain::Result;
use async_trait::async_trait;
use std::path::Path;

/// HTTP metadata attached to an uploaded object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeaders {
    /// `Content-Type`
    pub content_type: String,

    /// `Content-Encoding`, omitted when `None`
    pub content_encoding: Option<String>,
}

impl ObjectHeaders {
    /// `application/json` with `gzip` encoding, used for every feed file
    pub fn gzip_json() -> Self {
        Self {
            content_type: "application/json".to_string(),
            content_encoding: Some("gzip".to_string()),
        }
    }

    /// `application/json` without an encoding header
    pub fn plain_json() -> Self {
        Self {
            content_type: "application/json".to_string(),
            content_encoding: None,
        }
    }
}

/// Remote object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the local file at `path` under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read or the put fails.
    async fn put_file(&self, path: &Path, key: &str, headers: &ObjectHeaders) -> Result<()>;

    /// Whether an object exists under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error for any failure other than "not found".
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Human-readable location of `key`, e.g. `s3://bucket/key`
    fn describe(&self, key: &str) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_json_headers() {
        let headers = ObjectHeaders::gzip_json();
        assert_eq!(headers.content_type, "application/json");
        assert_eq!(headers.content_encoding.as_deref(), Some("gzip"));
    }

    #[test]
    fn test_plain_json_headers() {
        assert!(ObjectHeaders::plain_json().content_encoding.is_none());
    }
}
