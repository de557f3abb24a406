/// Daily reminder schedule
///
/// The user can pick a time of day to be reminded to journal. The schedule
/// store persists the chosen time together with the prompt period derived
/// from it; the actual notification scheduling happens in the app shell.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Which flavor of reminder prompt a scheduled time gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPeriod {
    /// Preparation prompt, 5:00 through 11:59
    Morning,
    /// Reflection prompt, 12:00 through 16:59
    Afternoon,
    /// Reflection prompt for the rest of the day, late night included
    Evening,
}

impl PromptPeriod {
    /// Derive the prompt period from an hour of day (0-23)
    pub fn from_hour(hour: u8) -> Self {
        if (5..12).contains(&hour) {
            PromptPeriod::Morning
        } else if (12..17).contains(&hour) {
            PromptPeriod::Afternoon
        } else {
            PromptPeriod::Evening
        }
    }
}

/// A daily reminder time and its derived prompt period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSchedule {
    pub hour: u8,
    pub minute: u8,
    pub period: PromptPeriod,
}

impl PromptSchedule {
    /// Create a schedule for the given local time with validation
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 {
            return Err(DomainError::InvalidTime(format!(
                "Hour must be 0-23, got {}",
                hour
            )));
        }
        if minute > 59 {
            return Err(DomainError::InvalidTime(format!(
                "Minute must be 0-59, got {}",
                minute
            )));
        }

        Ok(Self {
            hour,
            minute,
            period: PromptPeriod::from_hour(hour),
        })
    }
}
