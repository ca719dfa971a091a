//! In-process history storage.

use super::{HistoryStorage, decode, encode};
use crate::error::{Error, Result};
use crate::state::HistoryItem;
use std::sync::{Arc, Mutex};

/// Storage that keeps the encoded record in memory.
///
/// Clones share the same record, which lets a log be reopened against the
/// "same" storage. Used for tests and for running without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage preloaded with a raw record, e.g. a corrupt one.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            record: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw stored record, if anything has been written.
    pub fn raw(&self) -> Option<String> {
        self.record.lock().ok().and_then(|record| record.clone())
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<HistoryItem>> {
        let record = self
            .record
            .lock()
            .map_err(|e| Error::persistence(e.to_string()))?;
        match record.as_deref() {
            Some(raw) => decode(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        let encoded = encode(items)?;
        let mut record = self
            .record
            .lock()
            .map_err(|e| Error::persistence(e.to_string()))?;
        *record = Some(encoded);
        Ok(())
    }
}
