/// Reset coordinator
///
/// Fans a full data reset out to the raw key-value namespace and every state
/// store. There is no cross-store transaction: readers may observe a state
/// where one store is cleared and another is not yet. The coordinator is
/// idempotent; a second reset leaves the same end state.

use std::sync::Arc;

use thiserror::Error;

use crate::state::{JournalLog, ScheduleStore, SelectedBookStore, StatsEngine};
use crate::storage::{keys, KeyValueStore};

/// A reset that did not fully complete
///
/// Carries the names of the steps that failed; the display form is the single
/// user-facing message, the details live in the log.
#[derive(Error, Debug)]
#[error("An error occurred while resetting app data")]
pub struct ResetError {
    pub failed_steps: Vec<&'static str>,
}

pub struct ResetCoordinator {
    kv: Arc<dyn KeyValueStore>,
    books: Arc<SelectedBookStore>,
    journal: Arc<JournalLog>,
    stats: Arc<StatsEngine>,
    schedule: Arc<ScheduleStore>,
}

impl ResetCoordinator {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        books: Arc<SelectedBookStore>,
        journal: Arc<JournalLog>,
        stats: Arc<StatsEngine>,
        schedule: Arc<ScheduleStore>,
    ) -> Self {
        Self {
            kv,
            books,
            journal,
            stats,
            schedule,
        }
    }

    /// Clear everything: the raw namespace, then each store in sequence
    ///
    /// Every step runs even when an earlier one failed; the result is Ok only
    /// when all of them succeeded. Each failed step is logged individually
    /// and named in the returned error.
    pub async fn reset_all(&self) -> Result<(), ResetError> {
        let mut failed_steps = Vec::new();

        // Drop every known key, including ones written by older app versions
        if let Err(error) = self.kv.multi_remove(keys::ALL).await {
            tracing::error!("Failed to clear stored keys: {}", error);
            failed_steps.push("storage");
        } else if let Err(error) = self.kv.set(keys::JOURNAL_ENTRIES, "{}").await {
            // Keep a valid empty journal value rather than a missing key
            tracing::error!("Failed to write empty journal state: {}", error);
            failed_steps.push("storage");
        }

        if let Err(error) = self.books.update(None).await {
            tracing::error!("Failed to reset book selection: {}", error);
            failed_steps.push("book selection");
        }

        if let Err(error) = self.journal.reset_all().await {
            tracing::error!("Failed to reset journal entries: {}", error);
            failed_steps.push("journal entries");
        }

        if let Err(error) = self.stats.reset_stats().await {
            tracing::error!("Failed to reset stats: {}", error);
            failed_steps.push("stats");
        }

        if let Err(error) = self.schedule.update(None).await {
            tracing::error!("Failed to reset reminder schedule: {}", error);
            failed_steps.push("reminder schedule");
        }

        if failed_steps.is_empty() {
            tracing::info!("App data reset complete");
            Ok(())
        } else {
            Err(ResetError { failed_steps })
        }
    }
}
