/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a behavior the
/// user wants to track, along with validation and log bookkeeping.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use crate::domain::{CompletionType, DomainError, Frequency, HabitId, HabitLog, LogValue};

/// A habit represents something the user wants to do regularly
///
/// This is the core entity in our system. Field names are serialized in
/// camelCase so the stored collection keeps its established JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Drink water", "Read")
    pub name: String,
    /// Which calendar dates this habit is due on
    pub frequency: Frequency,
    /// Whether logs are done/not-done or a percentage
    pub completion_type: CompletionType,
    /// Weekday indices (0 = Monday) for custom frequency
    #[serde(default)]
    pub selected_days: Vec<u8>,
    /// At most one log per date
    #[serde(default)]
    pub logs: Vec<HabitLog>,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Selected days are only kept for custom habits; they are sorted and
    /// deduplicated.
    pub fn new(
        name: String,
        frequency: Frequency,
        completion_type: CompletionType,
        selected_days: Vec<u8>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        let selected_days = Self::normalize_days(frequency, selected_days)?;

        Ok(Self {
            id: HabitId::new(),
            name: name.trim().to_string(),
            frequency,
            completion_type,
            selected_days,
            logs: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Create a habit from existing data (used by tests and fixtures)
    ///
    /// No validation is performed.
    pub fn from_existing(
        id: HabitId,
        name: String,
        frequency: Frequency,
        completion_type: CompletionType,
        selected_days: Vec<u8>,
        logs: Vec<HabitLog>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            frequency,
            completion_type,
            selected_days,
            logs,
            created_at,
        }
    }

    /// Edit the habit's properties with validation
    ///
    /// Existing logs are left untouched, even when the completion type
    /// changes; readers coerce mismatched values.
    pub fn update(
        &mut self,
        name: Option<String>,
        frequency: Option<Frequency>,
        completion_type: Option<CompletionType>,
        selected_days: Option<Vec<u8>>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_name) = name {
            Self::validate_name(new_name)?;
        }

        // The schedule is only re-checked when it is being edited
        let new_frequency = frequency.unwrap_or(self.frequency);
        let new_days = if frequency.is_some() || selected_days.is_some() {
            let days = selected_days.unwrap_or_else(|| self.selected_days.clone());
            Some(Self::normalize_days(new_frequency, days)?)
        } else {
            None
        };

        if let Some(new_name) = name {
            self.name = new_name.trim().to_string();
        }
        if let Some(new_completion_type) = completion_type {
            self.completion_type = new_completion_type;
        }
        self.frequency = new_frequency;
        if let Some(days) = new_days {
            self.selected_days = days;
        }

        Ok(())
    }

    /// Find the log recorded for `date`, if any
    pub fn log_for(&self, date: NaiveDate) -> Option<&HabitLog> {
        self.logs.iter().find(|log| log.date == date)
    }

    /// Logs keyed by date, for lookups over long date ranges
    ///
    /// Agrees with `log_for` if stored data repeats a date.
    pub fn log_index(&self) -> HashMap<NaiveDate, &LogValue> {
        self.logs.iter().rev().map(|log| (log.date, &log.value)).collect()
    }

    /// Record the outcome for `date`, replacing any existing log for that date
    pub fn record_log(&mut self, date: NaiveDate, value: LogValue) -> Result<(), DomainError> {
        value.validate_for(self.completion_type)?;

        match self.logs.iter_mut().find(|log| log.date == date) {
            Some(existing) => existing.value = value,
            None => self.logs.push(HabitLog::new(date, value)),
        }
        Ok(())
    }

    /// Remove the log for `date`; returns whether one existed
    pub fn remove_log(&mut self, date: NaiveDate) -> bool {
        let before = self.logs.len();
        self.logs.retain(|log| log.date != date);
        self.logs.len() != before
    }

    /// First calendar date of the habit, in local time like `today`
    pub fn created_on(&self) -> NaiveDate {
        self.created_on_in(&Local)
    }

    /// Calendar date of `created_at` in the time zone `tz`
    pub fn created_on_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }

    /// Human-readable schedule, e.g. "daily" or "custom (Mon, Wed, Fri)"
    pub fn schedule_display(&self) -> String {
        match self.frequency {
            Frequency::Custom => {
                let days = self
                    .selected_days
                    .iter()
                    .map(|d| crate::domain::weekday_label(*d))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("custom ({})", days)
            }
            Frequency::Weekly => "weekly (Mondays)".to_string(),
            other => other.as_str().to_string(),
        }
    }

    /// Check a habit that was decoded from external data
    ///
    /// Unlike `new`, this accepts an empty custom schedule and logs whose
    /// value type differs from the completion type (they may predate an edit).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().is_empty() {
            return Err(DomainError::Validation {
                message: "Habit id cannot be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }
        if self.frequency == Frequency::Unrecognized {
            return Err(DomainError::InvalidFrequency(
                "frequency must be daily, weekly or custom".to_string(),
            ));
        }
        if let Some(day) = self.selected_days.iter().find(|d| **d > 6) {
            return Err(DomainError::InvalidDay(*day));
        }

        let mut seen = HashSet::new();
        for log in &self.logs {
            if !seen.insert(log.date) {
                return Err(DomainError::InvalidDate(format!(
                    "more than one log for {}",
                    log.date_key()
                )));
            }
            if let LogValue::Percentage(value) = log.value {
                if value > 100 {
                    return Err(DomainError::InvalidValue {
                        message: format!(
                            "log for {} has percentage {} (must be 0-100)",
                            log.date_key(),
                            value
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    /// Validate selected days and drop them for non-custom frequencies
    fn normalize_days(frequency: Frequency, days: Vec<u8>) -> Result<Vec<u8>, DomainError> {
        match frequency {
            Frequency::Custom => {
                if let Some(day) = days.iter().find(|d| **d > 6) {
                    return Err(DomainError::InvalidDay(*day));
                }
                let mut days = days;
                days.sort_unstable();
                days.dedup();
                if days.is_empty() {
                    return Err(DomainError::InvalidFrequency(
                        "Custom frequency must specify at least one day".to_string()
                    ));
                }
                Ok(days)
            }
            Frequency::Unrecognized => Err(DomainError::InvalidFrequency(
                "frequency must be daily, weekly or custom".to_string(),
            )),
            _ => Ok(Vec::new()),
        }
    }
}
