/// Reminder schedule store
///
/// Persists the user's chosen daily reminder time, if any. The notification
/// itself is scheduled by the app shell; this store only keeps the setting.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::PromptSchedule;
use crate::state::{new_state_channel, StateReceiver, StoreState};
use crate::storage::{keys, KeyValueStore, StorageError};

pub struct ScheduleStore {
    kv: Arc<dyn KeyValueStore>,
    state: watch::Sender<StoreState<Option<PromptSchedule>>>,
}

impl ScheduleStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            state: new_state_channel(None),
        }
    }

    /// Restore the persisted schedule; soft-fails to "no reminder"
    pub async fn load(&self) {
        let restored = match self.kv.get(keys::PROMPT_SCHEDULE).await {
            Ok(Some(raw)) => match serde_json::from_str::<PromptSchedule>(&raw) {
                Ok(schedule) => Some(schedule),
                Err(error) => {
                    tracing::warn!("Failed to parse stored reminder schedule: {}", error);
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!("Failed to load reminder schedule from storage: {}", error);
                None
            }
        };

        self.state.send_modify(|state| {
            state.value = restored;
            state.loading = false;
        });
    }

    /// Set or clear the reminder time
    pub async fn update(&self, schedule: Option<PromptSchedule>) -> Result<(), StorageError> {
        self.state.send_modify(|state| state.value = schedule);

        let result = match schedule {
            Some(schedule) => {
                let raw = serde_json::to_string(&schedule)?;
                self.kv.set(keys::PROMPT_SCHEDULE, &raw).await
            }
            None => self.kv.remove(keys::PROMPT_SCHEDULE).await,
        };

        if let Err(error) = &result {
            tracing::warn!("Failed to persist reminder schedule: {}", error);
        }
        result
    }

    pub fn schedule(&self) -> Option<PromptSchedule> {
        self.state.borrow().value
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> StateReceiver<Option<PromptSchedule>> {
        self.state.subscribe()
    }
}
