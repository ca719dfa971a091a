//! History stored as a JSON file on disk.

use super::{HistoryStorage, decode, encode};
use crate::error::{Error, Result};
use crate::state::HistoryItem;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed history storage.
///
/// Writes go to a sibling `.tmp` file which is flushed, synced and then
/// renamed over the real file, so a reader only ever sees a complete record.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the given file. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn write_tmp(&self, tmp_path: &Path, content: &str) -> Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}

impl HistoryStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<HistoryItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        decode(&content)
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = encode(items)?;
        let tmp_path = self.tmp_path();

        if let Err(e) = self.write_tmp(&tmp_path, &content) {
            remove_tmp(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            remove_tmp(&tmp_path);
            Error::persistence(format!("atomic rename failed: {e}"))
        })?;

        tracing::debug!(path = %self.path.display(), entries = items.len(), "History saved");
        Ok(())
    }
}

/// Best-effort cleanup of a temp file left by a failed save.
fn remove_tmp(tmp_path: &Path) {
    if tmp_path.is_file()
        && let Err(e) = fs::remove_file(tmp_path)
    {
        tracing::debug!(path = %tmp_path.display(), "Could not remove temp file: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MarketData;
    use tokio_test::{assert_err, assert_ok};

    fn item(id: &str, sector: &str) -> HistoryItem {
        HistoryItem {
            id: id.to_string(),
            sector: sector.to_string(),
            data: MarketData::new(format!("{sector} summary")),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));
        assert_eq!(assert_ok!(storage.load()), Vec::new());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join("history.json"));
        let items = vec![item("2", "Biotech"), item("1", "Fintech")];

        assert_ok!(storage.save(&items));
        assert_eq!(assert_ok!(storage.load()), items);
        assert!(!storage.tmp_path().exists());
    }

    #[test]
    fn test_record_layout() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));
        assert_ok!(storage.save(&[item("1", "Fintech")]));

        let raw = fs::read_to_string(storage.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(value["history"][0]["sector"], "Fintech");
        assert_eq!(value["history"][0]["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn test_failed_write_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("history.json"));
        assert_ok!(storage.save(&[item("1", "Fintech")]));
        let before = fs::read_to_string(storage.path()).unwrap();

        // A directory in the way makes creating the temp file fail
        fs::create_dir(storage.tmp_path()).unwrap();
        assert_err!(storage.save(&[item("2", "Biotech")]));

        assert_eq!(fs::read_to_string(storage.path()).unwrap(), before);
        assert!(!storage.tmp_path().is_file());
        assert_eq!(assert_ok!(storage.load()), vec![item("1", "Fintech")]);
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let storage = JsonFileStorage::new(path);
        let err = storage.save(&[item("1", "Fintech")]).unwrap_err();

        assert!(matches!(err, Error::Persistence(_)));
        assert!(!storage.tmp_path().exists());
        assert!(storage.path().join("keep").exists());
    }

    #[test]
    fn test_unwritable_parent_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let storage = JsonFileStorage::new(blocker.join("history.json"));
        assert_err!(storage.save(&[item("1", "Fintech")]));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ \"history\": [ {").unwrap();

        let storage = JsonFileStorage::new(path);
        assert_err!(storage.load());
    }
}
