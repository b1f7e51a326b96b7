//! Feed file writer
//!
//! A feed file is `{"data": [...]}` pretty-printed with four-space indent and
//! gzip-compressed. The compressed bytes go to `<name>.partial` first and are
//! renamed into place, so a reader sees either no file or a complete one.

use super::{to_pretty_json, write_atomically, WrittenFile};
use crate::domain::facility::FeedEntity;
use crate::domain::{FeedError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

#[derive(Serialize)]
struct FeedDocumentRef<'a> {
    data: &'a [FeedEntity],
}

#[derive(Deserialize)]
struct FeedDocument {
    data: Vec<FeedEntity>,
}

/// Serialize, compress and write one batch of entities to `dir/file_name`
///
/// # Errors
///
/// Returns [`FeedError::Serialization`] if the batch cannot be encoded and
/// [`FeedError::Io`] if compression or the file write fails.
pub fn write_feed_file(dir: &Path, file_name: &str, records: &[FeedEntity]) -> Result<WrittenFile> {
    let json = to_pretty_json(&FeedDocumentRef { data: records })?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    let path = dir.join(file_name);
    write_atomically(&path, &compressed)?;

    tracing::debug!(
        file = %file_name,
        records = records.len(),
        json_bytes = json.len(),
        gzip_bytes = compressed.len(),
        "Feed file written"
    );

    Ok(WrittenFile::new(file_name, path, &compressed, records.len()))
}

/// Decompress and parse a feed file back into its entities
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the file cannot be opened and
/// [`FeedError::Serialization`] if it is not a gzip feed document.
pub fn read_feed_file(path: &Path) -> Result<Vec<FeedEntity>> {
    let file = File::open(path).map_err(|e| {
        FeedError::Io(format!("Failed to open feed file {}: {}", path.display(), e))
    })?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let document: FeedDocument = serde_json::from_reader(decoder)?;
    Ok(document.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::transform_record;
    use crate::domain::RawFacility;
    use std::io::Read;
    use tempfile::TempDir;

    fn entity(id: &str) -> FeedEntity {
        transform_record(&RawFacility {
            id: id.to_string(),
            name: Some(format!("Facility {id}")),
            phone: None,
            url: None,
            latitude: Some(51.5072),
            longitude: Some(-0.1276),
            country: Some("GB".to_string()),
            locality: Some("London".to_string()),
            region: None,
            postal_code: None,
            street_address: None,
        })
    }

    #[test]
    fn test_write_then_read_preserves_records() {
        let dir = TempDir::new().unwrap();
        let records = vec![entity("1"), entity("2"), entity("3")];

        let written = write_feed_file(dir.path(), "facility_feed_1.json.gz", &records).unwrap();
        assert_eq!(written.records, 3);
        assert_eq!(written.name, "facility_feed_1.json.gz");
        assert!(written.path.exists());

        let read_back = read_feed_file(&written.path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_feed_file_is_pretty_printed_with_four_spaces() {
        let dir = TempDir::new().unwrap();
        let written = write_feed_file(dir.path(), "f.json.gz", &[entity("1")]).unwrap();

        let mut text = String::new();
        GzDecoder::new(File::open(&written.path).unwrap())
            .read_to_string(&mut text)
            .unwrap();

        assert!(text.starts_with("{\n    \"data\": [\n        {\n            \"entity_id\""));
    }

    #[test]
    fn test_no_partial_file_left_behind() {
        let dir = TempDir::new().unwrap();
        write_feed_file(dir.path(), "f.json.gz", &[entity("1")]).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["f.json.gz"]);
    }

    #[test]
    fn test_empty_batch_writes_empty_data_array() {
        let dir = TempDir::new().unwrap();
        let written = write_feed_file(dir.path(), "empty.json.gz", &[]).unwrap();
        assert_eq!(written.records, 0);
        assert!(read_feed_file(&written.path).unwrap().is_empty());
    }

    #[test]
    fn test_checksum_matches_file_contents() {
        use sha2::{Digest, Sha256};

        let dir = TempDir::new().unwrap();
        let written = write_feed_file(dir.path(), "f.json.gz", &[entity("1")]).unwrap();

        let bytes = std::fs::read(&written.path).unwrap();
        assert_eq!(written.size_bytes, bytes.len() as u64);
        assert_eq!(written.sha256, format!("{:x}", Sha256::digest(&bytes)));
    }

    #[test]
    fn test_read_feed_file_rejects_plain_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.json");
        std::fs::write(&path, "{\"data\": []}").unwrap();
        assert!(read_feed_file(&path).is_err());
    }
}
