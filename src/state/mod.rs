/// State containers backing the presentation layer
///
/// Each store here owns one slice of app state, keeps it inside a watch
/// channel so consumers can observe changes without polling, and persists it
/// through the shared key-value store. Mutators update the in-memory value
/// first and persist after; a failed persist is reported to the caller but
/// never rolls the in-memory value back.

pub mod book;
pub mod journal;
pub mod reset;
pub mod schedule;
pub mod stats;

// Re-export the store types
pub use book::SelectedBookStore;
pub use journal::JournalLog;
pub use reset::{ResetCoordinator, ResetError};
pub use schedule::ScheduleStore;
pub use stats::StatsEngine;

use tokio::sync::watch;

/// A store's observable state: the current value plus a loading flag
///
/// `loading` starts true and drops to false once the store's `load()` has
/// finished, whether or not anything was restored.
#[derive(Debug, Clone)]
pub struct StoreState<T> {
    pub value: T,
    pub loading: bool,
}

/// Notification channel that consumers re-render from
///
/// A receiver sees every state change via `changed()`; it is decoupled from
/// any particular UI framework.
pub type StateReceiver<T> = watch::Receiver<StoreState<T>>;

/// Create a store's state channel in the initial loading state
pub(crate) fn new_state_channel<T>(value: T) -> watch::Sender<StoreState<T>> {
    let (sender, _) = watch::channel(StoreState {
        value,
        loading: true,
    });
    sender
}
