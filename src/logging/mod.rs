//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output
//! - optional JSON file output with rotation
//! - level from the CLI, the config file, or `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use facility_feed::logging::init_logging;
//! use facility_feed::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a fetched batch
///
/// # Example
///
/// ```no_run
/// use facility_feed::log_batch_processing;
///
/// log_batch_processing!(3, 100, "facility_feed_1700000002.json.gz");
/// ```
#[macro_export]
macro_rules! log_batch_processing {
    ($batch:expr, $records:expr, $file:expr) => {
        tracing::info!(
            batch = $batch,
            records = $records,
            file = %$file,
            "Processing batch"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use facility_feed::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
