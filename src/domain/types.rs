/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like Frequency, CompletionType and
/// the habit ID type that are used by Habit, HabitLog, and the engine.

use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

/// Unique identifier for a habit
///
/// Newly created habits get a random UUID, but imported data may carry any
/// non-empty text, so the identifier is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier (useful for tool parameters and imports)
    pub fn from_string(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix used in human-readable listings
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HabitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How often a habit should be performed
///
/// The frequency decides which calendar dates a habit is due on. Weekly habits
/// are anchored on Monday; custom habits use the habit's selected weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every single day
    Daily,
    /// Once a week, checked on Monday
    Weekly,
    /// Specific days of the week (see `Habit::selected_days`)
    Custom,
    /// Anything else found in stored data. Never due.
    #[serde(other)]
    Unrecognized,
}

impl Frequency {
    /// Parse a user-supplied frequency name
    pub fn parse(s: &str) -> Result<Self, crate::domain::DomainError> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "custom" => Ok(Frequency::Custom),
            other => Err(crate::domain::DomainError::InvalidFrequency(format!(
                "'{}'. Valid options: daily, weekly, custom",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Custom => "custom",
            Frequency::Unrecognized => "unrecognized",
        }
    }
}

/// How completion of a habit is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionType {
    /// Done or not done
    Boolean,
    /// Integer progress from 0 to 100
    Percentage,
}

impl CompletionType {
    pub fn parse(s: &str) -> Result<Self, crate::domain::DomainError> {
        match s.trim().to_lowercase().as_str() {
            "boolean" => Ok(CompletionType::Boolean),
            "percentage" => Ok(CompletionType::Percentage),
            other => Err(crate::domain::DomainError::Validation {
                message: format!(
                    "Invalid completion type '{}'. Valid options: boolean, percentage",
                    other
                ),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionType::Boolean => "boolean",
            CompletionType::Percentage => "percentage",
        }
    }
}

/// Weekday index used across the application: Monday = 0 … Sunday = 6
///
/// All weekday arithmetic goes through this function and `weekday_from_index`.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Inverse of `weekday_index`; `None` for indices outside 0..=6
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Short display label for a weekday index ("Mon" … "Sun")
pub fn weekday_label(index: u8) -> &'static str {
    match weekday_from_index(index) {
        Some(Weekday::Mon) => "Mon",
        Some(Weekday::Tue) => "Tue",
        Some(Weekday::Wed) => "Wed",
        Some(Weekday::Thu) => "Thu",
        Some(Weekday::Fri) => "Fri",
        Some(Weekday::Sat) => "Sat",
        Some(Weekday::Sun) => "Sun",
        None => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_index_is_monday_based() {
        // 2024-03-04 is a Monday, 2024-03-10 a Sunday
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        assert_eq!(weekday_index(monday), 0);
        assert_eq!(weekday_index(sunday), 6);
        assert_eq!(weekday_from_index(6), Some(Weekday::Sun));
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn test_unknown_frequency_deserializes_defensively() {
        let freq: Frequency = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(freq, Frequency::Unrecognized);

        let freq: Frequency = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(freq, Frequency::Weekly);
        assert!(Frequency::parse("monthly").is_err());
    }

    #[test]
    fn test_short_id() {
        let id = HabitId::from_string("abcdef123456");
        assert_eq!(id.short(), "abcdef12");
        assert_eq!(HabitId::from_string("abc").short(), "abc");
    }
}
