/// SQLite implementation of the key-value storage interface
///
/// This module provides the concrete SQLite backend for the key-value store.
/// The whole namespace lives in a single `kv_entries` table; each operation is
/// one statement against it.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};

use crate::storage::{migrations, KeyValueStore, StorageError};

/// SQLite-based key-value store
///
/// The connection is guarded by a mutex so the store can be shared behind an
/// `Arc<dyn KeyValueStore>`. Queries are short single-row statements, so the
/// lock is never held for long.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new SQLite store at the given path
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite key-value store initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a store backed by an in-memory database (useful for testing)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Resolve a writable default location for the journal database
///
/// Tries the platform data directory, then the config directory, then falls
/// back to a temporary directory.
pub fn default_database_path() -> Result<PathBuf, std::io::Error> {
    let potential_dirs = [
        dirs::data_dir().map(|mut p| {
            p.push("growth_journal");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("growth_journal");
            p
        }),
    ];

    for dir in potential_dirs.iter().flatten() {
        if std::fs::create_dir_all(dir).is_ok() {
            // Test if we can write to this directory
            let test_file = dir.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(dir.join("journal.db"));
            }
        }
    }

    let mut temp_path = std::env::temp_dir();
    temp_path.push("growth_journal");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("journal.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock();
        let result = conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.lock().execute(
            "INSERT OR REPLACE INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;

        tracing::debug!("Stored value under key: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.lock().execute("DELETE FROM kv_entries", [])?;
        tracing::debug!("Cleared key-value namespace");
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT key FROM kv_entries ORDER BY key")?;
        let key_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for key in key_iter {
            keys.push(key?);
        }

        Ok(keys)
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let conn = self.lock();
        let mut stmt = conn.prepare("DELETE FROM kv_entries WHERE key = ?1")?;
        for key in keys {
            stmt.execute(params![key])?;
        }
        Ok(())
    }
}
