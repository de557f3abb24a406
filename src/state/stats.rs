/// Stats engine
///
/// Owns the persisted StatsRecord and keeps it consistent with the journal:
/// the streak is recomputed from journal snapshots, while the growth score
/// grows only on the first save of each calendar day.

use std::sync::Arc;

use chrono::Local;
use rand::Rng;
use tokio::sync::watch;

use crate::domain::{
    award_points, current_streak, latest_entry_date, JournalEntries, JournalEntry, StatsRecord,
    MAX_POINTS_PER_CHAR, MIN_POINTS_PER_CHAR,
};
use crate::state::{new_state_channel, StateReceiver, StoreState};
use crate::storage::{keys, KeyValueStore, StorageError};

pub struct StatsEngine {
    kv: Arc<dyn KeyValueStore>,
    state: watch::Sender<StoreState<StatsRecord>>,
}

impl StatsEngine {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            state: new_state_channel(StatsRecord::default()),
        }
    }

    /// Restore the persisted record, defaulting to zeros on absence or error
    pub async fn load(&self) {
        let restored = match self.kv.get(keys::USER_STATS).await {
            Ok(Some(raw)) => match serde_json::from_str::<StatsRecord>(&raw) {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!("Failed to parse stored stats: {}", error);
                    StatsRecord::default()
                }
            },
            Ok(None) => StatsRecord::default(),
            Err(error) => {
                tracing::warn!("Failed to load stats from storage: {}", error);
                StatsRecord::default()
            }
        };

        self.state.send_modify(|state| {
            state.value = restored;
            state.loading = false;
        });
    }

    /// Recompute the streak from a journal snapshot
    ///
    /// Called after the journal and stats have both loaded, and again whenever
    /// the journal changes. If the walked streak matches the current value the
    /// record is left untouched so no redundant write happens; otherwise the
    /// streak and the most recent entry date are replaced and persisted.
    pub async fn recompute_streak(&self, entries: &JournalEntries) -> Result<(), StorageError> {
        let computed = current_streak(entries);
        if computed == self.state.borrow().value.streak {
            return Ok(());
        }

        self.state.send_modify(|state| {
            state.value.streak = computed;
            state.value.last_entry_date = latest_entry_date(entries);
        });

        self.persist().await
    }

    /// Award growth points for saving an entry
    ///
    /// The first save of a calendar day awards
    /// `max(base_points, trimmed_length * rate)` points, with the rate drawn
    /// fresh from 7..=13 on every call; the streak advances and the day is
    /// recorded. Any later save on the same day is an edit: it returns 0 and
    /// leaves the record untouched.
    pub async fn update_growth_score(
        &self,
        base_points: u64,
        entry: &JournalEntry,
    ) -> Result<u64, StorageError> {
        let today = Local::now().date_naive();
        if self.state.borrow().value.last_entry_date == Some(today) {
            return Ok(0);
        }

        let rate = rand::thread_rng().gen_range(MIN_POINTS_PER_CHAR..=MAX_POINTS_PER_CHAR);
        let awarded = award_points(base_points, &entry.text, rate);

        self.state.send_modify(|state| {
            state.value.growth_score += awarded;
            state.value.streak += 1;
            state.value.last_entry_date = Some(today);
        });

        tracing::debug!("Awarded {} growth points for today's entry", awarded);

        self.persist().await?;
        Ok(awarded)
    }

    /// Zero the record and persist it
    pub async fn reset_stats(&self) -> Result<(), StorageError> {
        self.state
            .send_modify(|state| state.value = StatsRecord::default());

        self.persist().await
    }

    /// The current record
    pub fn record(&self) -> StatsRecord {
        self.state.borrow().value.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> StateReceiver<StatsRecord> {
        self.state.subscribe()
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.state.borrow().value)?;

        let result = self.kv.set(keys::USER_STATS, &raw).await;
        if let Err(error) = &result {
            tracing::warn!("Failed to persist stats: {}", error);
        }
        result
    }
}
