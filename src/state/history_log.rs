//! Bounded, persisted log of past searches.

use super::MarketData;
use crate::storage::HistoryStorage;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Most searches the log ever keeps.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// One past search and its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique within the log.
    pub id: String,
    /// The sector as it was searched (trimmed).
    pub sector: String,
    /// The result that was displayed for the search.
    pub data: MarketData,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

/// Newest-first log of searches, capped and written through to storage.
///
/// Every mutation is followed by a save of the full sequence. Storage
/// failures never reach the caller: a failed load starts an empty log, a
/// failed save is logged and leaves the log dirty.
pub struct HistoryLog {
    items: Vec<HistoryItem>,
    capacity: usize,
    storage: Box<dyn HistoryStorage>,
    /// Set when memory holds changes storage has not accepted yet.
    dirty: bool,
}

impl std::fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog")
            .field("items", &self.items.len())
            .field("capacity", &self.capacity)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl HistoryLog {
    /// Open the log with the default capacity.
    pub fn open(storage: Box<dyn HistoryStorage>) -> Self {
        Self::with_capacity(storage, MAX_HISTORY_ENTRIES)
    }

    /// Open the log, loading whatever the storage holds.
    ///
    /// `capacity` is clamped to `1..=MAX_HISTORY_ENTRIES`.
    pub fn with_capacity(storage: Box<dyn HistoryStorage>, capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_ENTRIES);
        let mut items = match storage.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Ignoring unreadable search history: {}", e);
                Vec::new()
            }
        };
        items.truncate(capacity);

        tracing::debug!(entries = items.len(), capacity, "History loaded");
        Self {
            items,
            capacity,
            storage,
            dirty: false,
        }
    }

    /// Record a successful search at the head of the log.
    pub fn append(&mut self, sector: impl Into<String>, data: MarketData) -> &HistoryItem {
        let sector = sector.into();
        let timestamp = Utc::now().timestamp_millis();
        let mut id = history_id(timestamp, &sector);
        while self.contains(&id) {
            id = history_id(timestamp, &sector);
        }

        self.items.insert(
            0,
            HistoryItem {
                id,
                sector,
                data,
                timestamp,
            },
        );
        self.items.truncate(self.capacity);
        self.persist();
        &self.items[0]
    }

    /// Remove an entry. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// All entries, newest first.
    pub fn list(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of an entry in log order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Check whether an id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the last change has not reached storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the current sequence to storage.
    pub fn flush(&mut self) -> crate::Result<()> {
        self.dirty = true;
        self.storage.save(&self.items)?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to persist search history: {}", e);
        }
    }
}

/// Build an id from the creation time, the sector and a random suffix.
fn history_id(timestamp: i64, sector: &str) -> String {
    let slug = crate::export::slugify(sector);
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{timestamp}-{slug}-{}", &suffix[..8])
}
