//! Manifest writer
//!
//! The manifest is written once per run, after the last feed file, and lists
//! every feed file name in the order the files were produced. Unlike feed
//! files it is plain JSON.

use super::naming::MANIFEST_FILE_NAME;
use super::{to_pretty_json, write_atomically, WrittenFile};
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Publisher name recorded in every manifest
pub const FEED_NAME: &str = "reservewithgoogle.entity";

/// Run manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// UNIX seconds at manifest generation
    pub generation_timestamp: i64,

    /// Fixed publisher name
    pub name: String,

    /// Feed file names, in production order
    pub data_file: Vec<String>,
}

impl Manifest {
    pub fn new(generation_timestamp: i64, data_file: Vec<String>) -> Self {
        Self {
            generation_timestamp,
            name: FEED_NAME.to_string(),
            data_file,
        }
    }
}

/// Write `manifest` to `dir/metadata.json`
///
/// The returned descriptor counts manifest entries in `records`.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<WrittenFile> {
    let json = to_pretty_json(manifest)?;
    let path = dir.join(MANIFEST_FILE_NAME);
    write_atomically(&path, &json)?;

    tracing::debug!(
        path = %path.display(),
        entries = manifest.data_file.len(),
        "Manifest written"
    );

    Ok(WrittenFile::new(
        MANIFEST_FILE_NAME,
        path,
        &json,
        manifest.data_file.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_manifest_contents() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::new(
            1_700_000_000,
            vec![
                "facility_feed_1.json.gz".to_string(),
                "facility_feed_2.json.gz".to_string(),
                "facility_feed_3.json.gz".to_string(),
            ],
        );

        let written = write_manifest(dir.path(), &manifest).unwrap();
        assert_eq!(written.name, "metadata.json");
        assert_eq!(written.records, 3);

        let value: Value = serde_json::from_slice(&std::fs::read(&written.path).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "generation_timestamp": 1_700_000_000,
                "name": "reservewithgoogle.entity",
                "data_file": [
                    "facility_feed_1.json.gz",
                    "facility_feed_2.json.gz",
                    "facility_feed_3.json.gz"
                ]
            })
        );
    }

    #[test]
    fn test_empty_manifest() {
        let dir = TempDir::new().unwrap();
        let written = write_manifest(dir.path(), &Manifest::new(5, vec![])).unwrap();

        let text = std::fs::read_to_string(&written.path).unwrap();
        let parsed: Manifest = serde_json::from_str(&text).unwrap();
        assert!(parsed.data_file.is_empty());
        assert!(text.contains("\n    \"name\": \"reservewithgoogle.entity\""));
    }
}
