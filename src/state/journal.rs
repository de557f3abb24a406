/// Journal entry log
///
/// A date-keyed mapping of journal entries, persisted as one serialized JSON
/// object under a single key. Every calendar day holds at most one entry;
/// writing again for the same day overwrites.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::domain::{JournalEntries, JournalEntry};
use crate::state::{new_state_channel, StateReceiver, StoreState};
use crate::storage::{keys, KeyValueStore, StorageError};

pub struct JournalLog {
    kv: Arc<dyn KeyValueStore>,
    state: watch::Sender<StoreState<JournalEntries>>,
}

impl JournalLog {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            state: new_state_channel(JournalEntries::new()),
        }
    }

    /// Restore the full entry mapping
    ///
    /// Missing or corrupt data yields an empty mapping, logged, never thrown.
    pub async fn load(&self) {
        let restored = match self.kv.get(keys::JOURNAL_ENTRIES).await {
            Ok(Some(raw)) => match serde_json::from_str::<JournalEntries>(&raw) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!("Failed to parse stored journal entries: {}", error);
                    JournalEntries::new()
                }
            },
            Ok(None) => JournalEntries::new(),
            Err(error) => {
                tracing::warn!("Failed to load journal entries from storage: {}", error);
                JournalEntries::new()
            }
        };

        self.state.send_modify(|state| {
            state.value = restored;
            state.loading = false;
        });
    }

    /// Insert or overwrite the entry for its calendar day
    ///
    /// Empty-text rejection is a precondition enforced by `JournalEntry`'s
    /// constructors; the log itself stores whatever validated entry it is
    /// given. The in-memory mapping is updated before persistence, so the UI
    /// stays optimistic even when the write fails.
    pub async fn upsert(&self, entry: JournalEntry) -> Result<(), StorageError> {
        self.state
            .send_modify(|state| {
                state.value.insert(entry.date, entry);
            });

        self.persist().await
    }

    /// The entry for a given day, if one exists
    pub fn get(&self, date: NaiveDate) -> Option<JournalEntry> {
        self.state.borrow().value.get(&date).cloned()
    }

    /// A read-only snapshot of the whole mapping
    pub fn entries(&self) -> JournalEntries {
        self.state.borrow().value.clone()
    }

    /// Remove one entry and persist
    ///
    /// Deleting a day that has no entry still persists and succeeds.
    pub async fn delete(&self, date: NaiveDate) -> Result<(), StorageError> {
        self.state.send_modify(|state| {
            state.value.remove(&date);
        });

        self.persist().await
    }

    /// Clear every entry
    ///
    /// Persists an empty mapping rather than removing the key, so a later
    /// read never sees a missing value.
    pub async fn reset_all(&self) -> Result<(), StorageError> {
        self.state.send_modify(|state| state.value.clear());

        let result = self.kv.set(keys::JOURNAL_ENTRIES, "{}").await;
        if let Err(error) = &result {
            tracing::warn!("Failed to persist journal reset: {}", error);
        }
        result
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> StateReceiver<JournalEntries> {
        self.state.subscribe()
    }

    /// Write the current mapping out as one JSON object
    async fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.state.borrow().value)?;

        let result = self.kv.set(keys::JOURNAL_ENTRIES, &raw).await;
        if let Err(error) = &result {
            tracing::warn!("Failed to persist journal entries: {}", error);
        }
        result
    }
}
