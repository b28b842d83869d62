//! Whole-collection snapshot persistence.
//!
//! The sole durability mechanism: each collection is mirrored to a single
//! JSON file that is rewritten wholesale on every mutation. There are no
//! partial or append writes, no write-ahead log, and no retries - an I/O
//! failure surfaces directly to the caller.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying medium failed.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),

    /// A snapshot file exists but does not parse, or a collection failed
    /// to serialize.
    #[error("snapshot `{name}` is unreadable: {source}")]
    Serde {
        /// Collection name.
        name: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Reads and writes whole-collection snapshot files under a data directory.
///
/// Collection `name` maps to `<root>/<name>.json`, a serialized array of
/// records. Saves replace the file via write-temp-then-rename, so a crash
/// mid-write never leaves a truncated snapshot behind (a deliberate
/// strengthening over plain overwrite; crashing between an in-memory
/// mutation and its save still loses that mutation).
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store rooted at `root`.
    ///
    /// The directory is created lazily on first save.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Load a collection snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot file exists yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read, or
    /// `StoreError::Serde` if it exists but does not parse as an array of
    /// records.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<Vec<T>>, StoreError> {
        let path = self.file_path(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let records = serde_json::from_slice(&bytes).map_err(|source| StoreError::Serde {
            name: name.to_owned(),
            source,
        })?;
        Ok(Some(records))
    }

    /// Write a collection snapshot, replacing any prior content.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the write or rename fails.
    pub fn save<T: Serialize>(&self, name: &str, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serde {
            name: name.to_owned(),
            source,
        })?;

        fs::create_dir_all(&self.root)?;
        let path = self.file_path(name);
        let tmp = self.root.join(format!("{name}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(collection = name, count = records.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Item {
        id: String,
        label: String,
    }

    fn item(id: &str, label: &str) -> Item {
        Item {
            id: id.to_owned(),
            label: label.to_owned(),
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let loaded: Option<Vec<Item>> = store.load("items").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        let items = vec![item("b", "second"), item("a", "first"), item("c", "third")];
        store.save("items", &items).unwrap();

        let loaded: Vec<Item> = store.load("items").unwrap().unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        store.save("items", &[item("a", "one"), item("b", "two")]).unwrap();
        store.save("items", &[item("c", "three")]).unwrap();

        let loaded: Vec<Item> = store.load("items").unwrap().unwrap();
        assert_eq!(loaded, vec![item("c", "three")]);
    }

    #[test]
    fn test_load_corrupt_snapshot_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        fs::write(dir.path().join("items.json"), b"not json").unwrap();
        let result: Result<Option<Vec<Item>>, _> = store.load("items");
        assert!(matches!(result, Err(StoreError::Serde { .. })));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        store.save("items", &[item("a", "one")]).unwrap();
        assert!(!dir.path().join("items.json.tmp").exists());
    }
}
