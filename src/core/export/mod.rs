//! Export orchestration
//!
//! - [`pipeline`] - the fetch, transform, write, publish loop
//! - [`coordinator`] - wires the configured source and store into a pipeline
//! - [`summary`] - per-run results and reporting

pub mod coordinator;
pub mod pipeline;
pub mod summary;

pub use coordinator::ExportCoordinator;
pub use pipeline::{system_clock, Clock, ExportPipeline};
pub use summary::{ExportError, ExportErrorType, ExportSummary, PublishedFile};
