/// Stats record and streak derivation
///
/// This module defines the persisted StatsRecord and the pure functions the
/// stats engine derives it from: the consecutive-day streak walk and the
/// growth-score award formula.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::JournalEntries;

/// Lower bound of the per-character score multiplier
pub const MIN_POINTS_PER_CHAR: u64 = 7;
/// Upper bound (inclusive) of the per-character score multiplier
pub const MAX_POINTS_PER_CHAR: u64 = 13;

/// Derived statistics persisted alongside the journal
///
/// `streak` counts consecutive calendar days with a non-empty entry, ending at
/// the most recent entry date. `growth_score` only ever grows, except on
/// reset, and only on the first save of a given calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub growth_score: u64,
    pub streak: u32,
    pub last_entry_date: Option<NaiveDate>,
}

/// Count the current streak from a journal snapshot
///
/// Walks calendar days backward from the most recent entry date, counting
/// days that hold an entry with non-empty text. The walk stops at the first
/// missing day or empty-text entry, so a gap breaks the streak even though
/// the log keys on either side of it are adjacent in sort order.
pub fn current_streak(entries: &JournalEntries) -> u32 {
    let mut day = match entries.keys().next_back() {
        Some(most_recent) => *most_recent,
        None => return 0,
    };

    let mut streak = 0;
    while let Some(entry) = entries.get(&day) {
        if !entry.has_text() {
            break;
        }
        streak += 1;
        day = match day.pred_opt() {
            Some(previous) => previous,
            None => break,
        };
    }

    streak
}

/// The most recent entry date in the log, regardless of streak breaks
pub fn latest_entry_date(entries: &JournalEntries) -> Option<NaiveDate> {
    entries.keys().next_back().copied()
}

/// Points awarded for a first save of the day
///
/// The caller draws `points_per_char` uniformly from
/// `MIN_POINTS_PER_CHAR..=MAX_POINTS_PER_CHAR`; the award is whichever is
/// larger, the base points or the per-character total over the trimmed text.
pub fn award_points(base_points: u64, text: &str, points_per_char: u64) -> u64 {
    let length = text.trim().chars().count() as u64;
    base_points.max(length * points_per_char)
}
