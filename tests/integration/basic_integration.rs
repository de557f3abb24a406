/// End-to-end scenarios over the wired-up state engine
use std::sync::Arc;

use chrono::Local;
use growth_journal::*;
use tempfile::tempdir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("growth_journal=debug")
        .with_test_writer()
        .try_init();
}

fn insight() -> DailyInsight {
    DailyInsight {
        insight: "Growth mindset sees challenges as opportunities.".to_string(),
        prompt: "Reflect on a recent challenge you faced.".to_string(),
    }
}

fn deep_work() -> CatalogBook {
    CatalogBook {
        id: "7".to_string(),
        title: "Deep Work".to_string(),
        author: "Cal Newport".to_string(),
        cover_image: "https://example.com/deep-work.jpg".to_string(),
        key_insights: vec![
            "Focus without distraction on cognitively demanding tasks".to_string(),
        ],
        category: "Productivity".to_string(),
    }
}

#[tokio::test]
async fn test_first_save_of_the_day() {
    init_tracing();

    let app = GrowthJournal::new(Arc::new(MemoryStore::new()));
    app.load().await;

    // Fresh state: nothing loaded, no streak
    assert_eq!(app.stats().record().streak, 0);
    assert!(app.journal().entries().is_empty());

    let awarded = app.save_entry("Hello".to_string(), &insight()).await.unwrap();

    // 5 characters at 7..=13 points per character, never below the base of 10
    assert!(awarded >= 35 && awarded <= 65, "awarded {}", awarded);
    assert!(awarded >= 10);

    let today = Local::now().date_naive();
    let record = app.stats().record();
    assert_eq!(record.streak, 1);
    assert_eq!(record.growth_score, awarded);
    assert_eq!(record.last_entry_date, Some(today));

    let entry = app.journal().get(today).unwrap();
    assert_eq!(entry.text, "Hello");
    assert_eq!(entry.prompt, insight().prompt);
}

#[tokio::test]
async fn test_second_save_same_day_awards_nothing() {
    let app = GrowthJournal::new(Arc::new(MemoryStore::new()));
    app.load().await;

    let first = app.save_entry("Hello".to_string(), &insight()).await.unwrap();
    let second = app
        .save_entry("Hello again, this edit is much longer".to_string(), &insight())
        .await
        .unwrap();

    assert_eq!(second, 0);

    let record = app.stats().record();
    assert_eq!(record.growth_score, first);
    assert_eq!(record.streak, 1);

    // The edit still replaced the entry text
    let today = Local::now().date_naive();
    assert_eq!(
        app.journal().get(today).unwrap().text,
        "Hello again, this edit is much longer"
    );
    assert_eq!(app.journal().entries().len(), 1);
}

#[tokio::test]
async fn test_streak_counts_consecutive_days_and_stops_at_gaps() {
    let app = GrowthJournal::new(Arc::new(MemoryStore::new()));
    app.load().await;

    let today = Local::now().date_naive();
    let yesterday = today - chrono::Duration::days(1);
    let four_days_ago = today - chrono::Duration::days(4);

    // Backfill the log: yesterday plus an old entry before a gap
    app.journal()
        .upsert(JournalEntry::dated(four_days_ago, "Before the gap".to_string(), &insight()).unwrap())
        .await
        .unwrap();
    app.journal()
        .upsert(JournalEntry::dated(yesterday, "Yesterday".to_string(), &insight()).unwrap())
        .await
        .unwrap();
    app.journal()
        .upsert(JournalEntry::dated(today, "Today".to_string(), &insight()).unwrap())
        .await
        .unwrap();

    app.stats()
        .recompute_streak(&app.journal().entries())
        .await
        .unwrap();

    // Today and yesterday count; the gap cuts off the older entry
    let record = app.stats().record();
    assert_eq!(record.streak, 2);
    assert_eq!(record.last_entry_date, Some(today));
}

#[tokio::test]
async fn test_deleting_todays_entry_rewinds_the_streak() {
    let app = GrowthJournal::new(Arc::new(MemoryStore::new()));
    app.load().await;

    app.save_entry("Here today".to_string(), &insight()).await.unwrap();
    assert_eq!(app.stats().record().streak, 1);

    let today = Local::now().date_naive();
    app.delete_entry(today).await.unwrap();

    assert_eq!(app.journal().get(today), None);
    assert_eq!(app.stats().record().streak, 0);
}

#[tokio::test]
async fn test_empty_text_is_rejected_before_any_store_call() {
    let app = GrowthJournal::new(Arc::new(MemoryStore::new()));
    app.load().await;

    let result = app.save_entry("    ".to_string(), &insight()).await;
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::EmptyEntryText))
    ));

    assert!(app.journal().entries().is_empty());
    assert_eq!(app.stats().record().growth_score, 0);
}

#[tokio::test]
async fn test_full_reset_is_idempotent() {
    let app = GrowthJournal::new(Arc::new(MemoryStore::new()));
    app.load().await;

    app.books().update(Some(deep_work())).await.unwrap();
    app.save_entry("A populated day".to_string(), &insight()).await.unwrap();
    app.schedule()
        .update(Some(PromptSchedule::new(21, 30).unwrap()))
        .await
        .unwrap();

    app.reset_all().await.unwrap();

    assert_eq!(app.books().selected(), None);
    assert!(app.journal().entries().is_empty());
    assert_eq!(app.stats().record(), StatsRecord::default());
    assert_eq!(app.schedule().schedule(), None);

    // Calling twice in a row yields the same end state
    app.reset_all().await.unwrap();
    assert_eq!(app.books().selected(), None);
    assert!(app.journal().entries().is_empty());
    assert_eq!(app.stats().record(), StatsRecord::default());
}

#[tokio::test]
async fn test_state_survives_restart_on_sqlite() {
    init_tracing();

    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("journal.db");

    let awarded = {
        let kv: Arc<dyn KeyValueStore> =
            Arc::new(SqliteStore::new(db_path.clone()).expect("Failed to open store"));
        let app = GrowthJournal::new(kv);
        app.load().await;

        app.books().update(Some(deep_work())).await.unwrap();
        app.save_entry("Persisted across restarts".to_string(), &insight())
            .await
            .unwrap()
    };

    // A second engine over the same database restores everything
    let kv: Arc<dyn KeyValueStore> =
        Arc::new(SqliteStore::new(db_path).expect("Failed to reopen store"));
    let app = GrowthJournal::new(kv);
    app.load().await;

    let today = Local::now().date_naive();
    assert_eq!(app.books().selected().map(|b| b.title), Some("Deep Work".to_string()));
    assert_eq!(
        app.journal().get(today).map(|e| e.text),
        Some("Persisted across restarts".to_string())
    );

    let record = app.stats().record();
    assert_eq!(record.growth_score, awarded);
    assert_eq!(record.streak, 1);
    assert_eq!(record.last_entry_date, Some(today));
}
