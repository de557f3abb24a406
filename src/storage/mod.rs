/// Storage layer for persisting journal data
///
/// This module defines the asynchronous key-value interface the state stores
/// persist through, plus the two concrete backends: an in-memory map and a
/// SQLite-backed store.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;

/// Keys used in the persisted key-value namespace
///
/// Values under these keys are JSON strings. The legacy keys are never written
/// by this crate but are still cleared on a full reset so that data written by
/// earlier app versions does not survive.
pub mod keys {
    pub const SELECTED_BOOK: &str = "selectedBook";
    pub const JOURNAL_ENTRIES: &str = "journalEntries";
    pub const USER_STATS: &str = "userStats";
    pub const PROMPT_SCHEDULE: &str = "promptSchedule";

    /// Legacy keys from app versions that stored score and streak separately
    pub const LEGACY_GROWTH_SCORE: &str = "growthScore";
    pub const LEGACY_STREAK_COUNT: &str = "streakCount";

    /// Every key a full reset must clear
    pub const ALL: &[&str] = &[
        SELECTED_BOOK,
        JOURNAL_ENTRIES,
        USER_STATS,
        PROMPT_SCHEDULE,
        LEGACY_GROWTH_SCORE,
        LEGACY_STREAK_COUNT,
    ];
}

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Asynchronous key-value persistence interface
///
/// This trait models the device key-value store the app persists through:
/// string keys, string (JSON) values, one flat namespace, no transactions.
/// All state stores share a single `Arc<dyn KeyValueStore>`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, creating or overwriting
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key in the namespace
    async fn clear(&self) -> Result<(), StorageError>;

    /// List every key currently present
    async fn get_all_keys(&self) -> Result<Vec<String>, StorageError>;

    /// Remove several keys in one call
    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError>;
}
