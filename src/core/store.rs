//! Persistent store - the document as one JSON file on disk

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::document::Document;

/// Load/save boundary between the lifecycle core and whatever holds the data.
///
/// The core calls `save` exactly once per successful mutation; swapping the
/// implementation (tests use an in-memory store) changes nothing else.
pub trait Store {
    fn load(&self) -> Result<Document, StoreError>;
    fn save(&self, document: &Document) -> Result<(), StoreError>;
}

/// Errors that can occur at the persistence boundary
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data file {path:?} is not a valid document")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot access data file {path:?}")]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Single-file JSON store.
///
/// A missing file loads as an empty document; an unparsable file is an
/// error for the caller to act on, never silently reinitialized.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    fn load(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            return Ok(Document::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StoreError::Unwritable {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(document).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, contents).map_err(|source| StoreError::Unwritable {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Turbine;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty_document() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        let doc = store.load().unwrap();
        assert!(doc.turbines.is_empty());
        assert!(doc.installation_records.is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("data.json"));

        let mut doc = Document::default();
        doc.turbines.push(Turbine {
            turbine_id: 1,
            serial_number: "T-SN-101".to_string(),
            frame_type: "GE 1.5sle".to_string(),
            location: "Wind Farm Alpha".to_string(),
            current_total_hours: 50000.5,
            current_total_starts: 1200,
            extra: Default::default(),
        });
        store.save(&doc).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"turbines": {"oops": "not a list"}}"#).unwrap();

        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_unknown_record_fields_survive_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{
                "turbines": [{
                    "turbine_id": 1,
                    "serial_number": "T-1",
                    "frame_type": "9E",
                    "legacy_asset_tag": "A-0042"
                }]
            }"#,
        )
        .unwrap();

        let store = JsonStore::new(&path);
        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("legacy_asset_tag"));
        assert!(raw.contains("A-0042"));
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempdir().unwrap();
        // A path whose parent doesn't exist
        let store = JsonStore::new(dir.path().join("missing/sub/dir/data.json"));

        let err = store.save(&Document::default()).unwrap_err();
        assert!(matches!(err, StoreError::Unwritable { .. }));
    }
}
