/// JournalEntry entity for the date-keyed entry log
///
/// This module defines the JournalEntry struct that represents what the user
/// wrote on a specific calendar day, together with the insight and prompt the
/// entry was written against.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DailyInsight, DomainError};

/// The full journal: one entry per calendar day, keyed by that day
///
/// `BTreeMap` keeps iteration chronological; the serialized form is a JSON
/// object keyed by ISO date strings.
pub type JournalEntries = BTreeMap<NaiveDate, JournalEntry>;

/// A journal entry written on a specific calendar day
///
/// Each calendar day holds at most one entry; saving again on the same day
/// overwrites. The insight and prompt are copied in at save time so the entry
/// keeps the question it answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// What the user wrote
    pub text: String,
    /// Which calendar day this entry is for (also the log key)
    pub date: NaiveDate,
    /// When this entry was saved
    pub timestamp: DateTime<Utc>,
    /// The insight shown when the entry was written
    pub insight: String,
    /// The reflection prompt the entry responds to
    pub prompt: String,
}

impl JournalEntry {
    /// Create a new entry for today with validation
    ///
    /// The entry date is the device's local calendar day. Rejecting empty text
    /// here is the save precondition: an empty entry never reaches the log.
    pub fn new(text: String, insight: &DailyInsight) -> Result<Self, DomainError> {
        Self::dated(Local::now().date_naive(), text, insight)
    }

    /// Create an entry for a specific calendar day with validation
    pub fn dated(
        date: NaiveDate,
        text: String,
        insight: &DailyInsight,
    ) -> Result<Self, DomainError> {
        Self::validate_text(&text)?;
        Self::validate_date(&date)?;

        Ok(Self {
            text,
            date,
            timestamp: Utc::now(),
            insight: insight.insight.clone(),
            prompt: insight.prompt.clone(),
        })
    }

    /// Whether this entry counts toward the streak
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    // Validation helper methods

    /// Validate that the entry text is non-empty after trimming
    fn validate_text(text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyEntryText);
        }
        Ok(())
    }

    /// Validate that the entry date is not in the future
    fn validate_date(date: &NaiveDate) -> Result<(), DomainError> {
        let today = Local::now().date_naive();
        if *date > today {
            return Err(DomainError::InvalidDate(
                "Cannot write journal entries for future dates".to_string(),
            ));
        }
        Ok(())
    }
}
