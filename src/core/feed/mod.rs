//! Feed and manifest files
//!
//! - [`writer`] - gzip feed files, one per batch
//! - [`manifest`] - the run manifest (`metadata.json`)
//! - [`naming`] - unique per-run feed file names

pub mod manifest;
pub mod naming;
pub mod writer;

pub use manifest::{write_manifest, Manifest, FEED_NAME};
pub use naming::{feed_file_name, FeedFileNamer, MANIFEST_FILE_NAME};
pub use writer::{read_feed_file, write_feed_file};

use crate::domain::{FeedError, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A file written to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// File name, also used as the remote key
    pub name: String,

    /// Local path
    pub path: PathBuf,

    /// Size on disk
    pub size_bytes: u64,

    /// SHA-256 of the bytes on disk, hex encoded
    pub sha256: String,

    /// Records in a feed file, entries in a manifest
    pub records: usize,
}

impl WrittenFile {
    fn new(name: &str, path: PathBuf, bytes: &[u8], records: usize) -> Self {
        Self {
            name: name.to_string(),
            path,
            size_bytes: bytes.len() as u64,
            sha256: format!("{:x}", Sha256::digest(bytes)),
            records,
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    std::fs::write(&partial, bytes).map_err(|e| {
        FeedError::Io(format!("Failed to write {}: {}", partial.display(), e))
    })?;
    std::fs::rename(&partial, path).map_err(|e| {
        FeedError::Io(format!(
            "Failed to move {} into place: {}",
            path.display(),
            e
        ))
    })?;
    Ok(())
}
