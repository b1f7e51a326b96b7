//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types. Adapters
//! convert driver and SDK errors into these variants at the boundary.

use thiserror::Error;

/// Main facility feed error type
#[derive(Debug, Error)]
pub enum FeedError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Record source errors (connection, query, cursor)
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Object store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A source row did not have the expected facility shape
    #[error("Transform error: {0}")]
    Transform(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Record source errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to build the connection pool
    #[error("Failed to create connection pool: {0}")]
    PoolCreationFailed(String),

    /// Failed to acquire a connection from the pool
    #[error("Failed to get connection from pool: {0}")]
    ConnectionFailed(String),

    /// Cursor could not be opened or closed
    #[error("Cursor error: {0}")]
    CursorFailed(String),

    /// A fetch or query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// TLS connector could not be built
    #[error("TLS setup failed: {0}")]
    Tls(String),
}

/// Object store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store client could not be configured
    #[error("Failed to initialize storage client: {0}")]
    ClientInitFailed(String),

    /// The local file to upload could not be opened
    #[error("Failed to read {path} for upload: {message}")]
    ReadFailed { path: String, message: String },

    /// The remote put failed
    #[error("Upload of {key} failed: {message}")]
    UploadFailed { key: String, message: String },

    /// An existence check failed for a reason other than "not found"
    #[error("Failed to check {key}: {message}")]
    HeadFailed { key: String, message: String },
}

impl StorageError {
    /// Remote key the error refers to, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            StorageError::UploadFailed { key, .. } | StorageError::HeadFailed { key, .. } => {
                Some(key)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for FeedError {
    fn from(err: toml::de::Error) -> Self {
        FeedError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        let err = FeedError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_database_error_conversion() {
        let db_err = DatabaseError::QueryFailed("relation does not exist".to_string());
        let feed_err: FeedError = db_err.into();
        assert!(matches!(feed_err, FeedError::Database(_)));
        assert!(feed_err.to_string().contains("relation does not exist"));
    }

    #[test]
    fn test_storage_error_conversion() {
        let storage_err = StorageError::UploadFailed {
            key: "metadata.json".to_string(),
            message: "AccessDenied".to_string(),
        };
        assert_eq!(storage_err.key(), Some("metadata.json"));
        let feed_err: FeedError = storage_err.into();
        assert!(matches!(feed_err, FeedError::Storage(_)));
    }

    #[test]
    fn test_storage_error_key_absent() {
        let err = StorageError::ClientInitFailed("no region".to_string());
        assert!(err.key().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let feed_err: FeedError = io_err.into();
        assert!(matches!(feed_err, FeedError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let feed_err: FeedError = json_err.into();
        assert!(matches!(feed_err, FeedError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let feed_err: FeedError = toml_err.into();
        assert!(matches!(feed_err, FeedError::Configuration(_)));
        assert!(feed_err.to_string().contains("TOML parse error"));
    }
}
