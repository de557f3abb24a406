/// Basic unit tests against the public API
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use growth_journal::*;

/// Key-value store whose writes always fail, for exercising the
/// optimistic-mutation contract
struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("storage unavailable".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("storage unavailable".to_string()))
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("storage unavailable".to_string()))
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }

    async fn multi_remove(&self, _keys: &[&str]) -> Result<(), StorageError> {
        Err(StorageError::Connection("storage unavailable".to_string()))
    }
}

fn insight() -> DailyInsight {
    DailyInsight {
        insight: "We cannot control what happens to us, only our response.".to_string(),
        prompt: "What challenging circumstance can you reframe today?".to_string(),
    }
}

#[test]
fn test_whitespace_entry_never_reaches_the_log() {
    let result = JournalEntry::new("   \t\n".to_string(), &insight());
    assert!(matches!(result, Err(DomainError::EmptyEntryText)));
}

#[test]
fn test_entry_captures_insight_and_prompt() {
    let entry = JournalEntry::new("Reframed my commute as reading time".to_string(), &insight())
        .unwrap();

    assert_eq!(entry.date, Local::now().date_naive());
    assert_eq!(entry.insight, insight().insight);
    assert_eq!(entry.prompt, insight().prompt);
}

#[test]
fn test_reset_key_list_covers_every_store() {
    for key in [
        keys::SELECTED_BOOK,
        keys::JOURNAL_ENTRIES,
        keys::USER_STATS,
        keys::PROMPT_SCHEDULE,
        keys::LEGACY_GROWTH_SCORE,
        keys::LEGACY_STREAK_COUNT,
    ] {
        assert!(keys::ALL.contains(&key), "missing reset key: {}", key);
    }
}

#[tokio::test]
async fn test_failed_write_keeps_optimistic_state() {
    let log = JournalLog::new(Arc::new(FailingStore));
    log.load().await;

    let entry = JournalEntry::new("Written during an outage".to_string(), &insight()).unwrap();
    let date = entry.date;

    let result = log.upsert(entry.clone()).await;
    assert!(result.is_err());

    // The in-memory mutation is not rolled back
    assert_eq!(log.get(date), Some(entry));
}

#[tokio::test]
async fn test_failed_reset_names_every_failed_step() {
    let app = GrowthJournal::new(Arc::new(FailingStore));
    app.load().await;

    let error = app.reset_all().await.unwrap_err();

    // The raw namespace, the journal and the stats all fail to persist their
    // reset; clearing the book and schedule fail on key removal too.
    assert!(error.failed_steps.contains(&"storage"));
    assert!(error.failed_steps.contains(&"journal entries"));
    assert!(error.failed_steps.contains(&"stats"));
    assert!(error.failed_steps.contains(&"book selection"));
    assert!(error.failed_steps.contains(&"reminder schedule"));
}

#[tokio::test]
async fn test_journal_subscription_notifies_on_upsert() {
    let log = JournalLog::new(Arc::new(MemoryStore::new()));
    log.load().await;

    let mut receiver = log.subscribe();
    receiver.borrow_and_update();

    let entry = JournalEntry::new("Subscribed".to_string(), &insight()).unwrap();
    log.upsert(entry.clone()).await.unwrap();

    assert!(receiver.has_changed().unwrap());
    assert_eq!(
        receiver.borrow_and_update().value.get(&entry.date),
        Some(&entry)
    );
}

#[tokio::test]
async fn test_stats_subscription_notifies_on_award() {
    let stats = StatsEngine::new(Arc::new(MemoryStore::new()));
    stats.load().await;

    let mut receiver = stats.subscribe();
    receiver.borrow_and_update();

    let entry = JournalEntry::new("Hello".to_string(), &insight()).unwrap();
    stats.update_growth_score(10, &entry).await.unwrap();

    assert!(receiver.has_changed().unwrap());
    assert_eq!(receiver.borrow_and_update().value.streak, 1);
}
