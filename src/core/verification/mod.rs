//! Post-publish reconciliation
//!
//! Confirms that the manifest and every feed file it lists exist in the
//! object store after a run.

pub mod reconcile;
pub mod report;

pub use reconcile::Reconciler;
pub use report::{ReconciliationFailure, ReconciliationReport};
