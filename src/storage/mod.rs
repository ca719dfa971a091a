//! Durable storage for the search history.
//!
//! Only the history sequence is ever persisted. The record layout is a
//! single JSON object `{ "history": [...] }`; transient session fields never
//! reach storage.

mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use crate::state::HistoryItem;
use serde::{Deserialize, Serialize};

/// The persisted record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedHistory {
    /// Newest first.
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

/// A place the history log can be read from and written to.
///
/// `load` returns an empty sequence when nothing has been stored yet and an
/// error when the stored record cannot be read or decoded. `save` replaces
/// the stored record in one step.
pub trait HistoryStorage: Send + Sync {
    /// Read the stored history.
    fn load(&self) -> Result<Vec<HistoryItem>>;

    /// Replace the stored history.
    fn save(&self, items: &[HistoryItem]) -> Result<()>;
}

pub(crate) fn encode(items: &[HistoryItem]) -> Result<String> {
    let record = PersistedHistory {
        history: items.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}

pub(crate) fn decode(raw: &str) -> Result<Vec<HistoryItem>> {
    let record: PersistedHistory = serde_json::from_str(raw)?;
    Ok(record.history)
}
