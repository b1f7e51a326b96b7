//! Object store integration
//!
//! [`ObjectStore`] is the seam the publisher uploads through;
//! [`S3ObjectStore`] is the production implementation.

pub mod s3;
pub mod traits;

pub use s3::S3ObjectStore;
pub use traits::{ObjectHeaders, ObjectStore};
