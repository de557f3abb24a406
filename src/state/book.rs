/// Selected-book store
///
/// Holds at most one chosen catalog entry and persists a serialized copy of
/// it, so the stored selection is independent of later catalog changes.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::CatalogBook;
use crate::state::{new_state_channel, StateReceiver, StoreState};
use crate::storage::{keys, KeyValueStore, StorageError};

pub struct SelectedBookStore {
    kv: Arc<dyn KeyValueStore>,
    state: watch::Sender<StoreState<Option<CatalogBook>>>,
}

impl SelectedBookStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            state: new_state_channel(None),
        }
    }

    /// Restore the persisted selection
    ///
    /// Fails soft: a missing key or corrupt value leaves no book selected and
    /// is only logged. The loading flag drops either way.
    pub async fn load(&self) {
        let restored = match self.kv.get(keys::SELECTED_BOOK).await {
            Ok(Some(raw)) => match serde_json::from_str::<CatalogBook>(&raw) {
                Ok(book) => Some(book),
                Err(error) => {
                    tracing::warn!("Failed to parse stored book selection: {}", error);
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!("Failed to load selected book from storage: {}", error);
                None
            }
        };

        self.state.send_modify(|state| {
            state.value = restored;
            state.loading = false;
        });
    }

    /// Select a book, or clear the selection with `None`
    ///
    /// The in-memory selection changes immediately; persistence follows. If
    /// the write fails the selection stays changed in memory and the error is
    /// returned. Concurrent callers are not serialized; the last persisted
    /// write wins.
    pub async fn update(&self, book: Option<CatalogBook>) -> Result<(), StorageError> {
        self.state.send_modify(|state| state.value = book.clone());

        let result = match &book {
            Some(book) => {
                let raw = serde_json::to_string(book)?;
                self.kv.set(keys::SELECTED_BOOK, &raw).await
            }
            None => self.kv.remove(keys::SELECTED_BOOK).await,
        };

        if let Err(error) = &result {
            tracing::warn!("Failed to persist selected book: {}", error);
        }
        result
    }

    /// The currently selected book, if any
    pub fn selected(&self) -> Option<CatalogBook> {
        self.state.borrow().value.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> StateReceiver<Option<CatalogBook>> {
        self.state.subscribe()
    }
}
