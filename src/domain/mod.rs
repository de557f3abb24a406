/// Domain module containing core business logic and data types
///
/// This module defines the core entities (CatalogBook, JournalEntry,
/// StatsRecord, PromptSchedule) and their validation rules, plus the pure
/// streak derivation the stats engine is built on.

pub mod book;
pub mod entry;
pub mod schedule;
pub mod stats;

// Re-export public types for easy access
pub use book::*;
pub use entry::*;
pub use schedule::*;
pub use stats::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Journal entry text must not be empty")]
    EmptyEntryText,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid reminder time: {0}")]
    InvalidTime(String),
}
