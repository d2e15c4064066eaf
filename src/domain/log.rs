/// HabitLog entity for recording a day's outcome
///
/// This module defines the HabitLog struct that represents the recorded
/// outcome of one habit on one calendar date, and the tagged value it carries.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{CompletionType, DomainError};

/// The recorded value of a log
///
/// Serialized untagged so the stored layout stays a bare JSON `true`/`false`
/// or integer. Deserialization is strict: anything else fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    /// Done / not done
    Boolean(bool),
    /// Progress from 0 to 100. Wider than needed so a stored value above
    /// 100 still decodes; readers clamp it.
    Percentage(u16),
}

impl LogValue {
    /// Completion percentage of this value when read under `completion_type`
    ///
    /// Values recorded under a different completion type are coerced:
    /// a boolean under a percentage habit reads as 100 or 0, and a
    /// percentage under a boolean habit never equals `true`, so it reads as 0.
    pub fn percent(&self, completion_type: CompletionType) -> u8 {
        match (completion_type, self) {
            (_, LogValue::Boolean(true)) => 100,
            (_, LogValue::Boolean(false)) => 0,
            (CompletionType::Percentage, LogValue::Percentage(value)) => (*value).min(100) as u8,
            (CompletionType::Boolean, LogValue::Percentage(_)) => 0,
        }
    }

    /// Fractional credit in [0, 1] used by completion-rate aggregation
    pub fn credit(&self, completion_type: CompletionType) -> f64 {
        f64::from(self.percent(completion_type)) / 100.0
    }

    /// Whether this value counts as a fully completed day
    pub fn is_complete(&self, completion_type: CompletionType) -> bool {
        self.percent(completion_type) >= 100
    }

    /// `true` or any positive percentage, regardless of completion type
    pub fn is_positive(&self) -> bool {
        match self {
            LogValue::Boolean(done) => *done,
            LogValue::Percentage(value) => *value > 0,
        }
    }

    pub fn matches(&self, completion_type: CompletionType) -> bool {
        matches!(
            (completion_type, self),
            (CompletionType::Boolean, LogValue::Boolean(_))
                | (CompletionType::Percentage, LogValue::Percentage(_))
        )
    }

    /// Check the value against the habit it is written for
    pub fn validate_for(&self, completion_type: CompletionType) -> Result<(), DomainError> {
        if !self.matches(completion_type) {
            return Err(DomainError::InvalidValue {
                message: format!(
                    "A {} habit cannot record the value {}",
                    completion_type.as_str(),
                    self
                ),
            });
        }
        Self::validate_range(self)
    }

    fn validate_range(&self) -> Result<(), DomainError> {
        if let LogValue::Percentage(value) = self {
            if *value > 100 {
                return Err(DomainError::InvalidValue {
                    message: format!("Percentage must be between 0 and 100, got {}", value),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for LogValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogValue::Boolean(done) => write!(f, "{}", done),
            LogValue::Percentage(value) => write!(f, "{}%", value),
        }
    }
}

/// One day's recorded outcome for a habit
///
/// The date is the natural key inside a habit's log collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    /// Calendar date this outcome is for (`yyyy-MM-dd` on the wire)
    pub date: NaiveDate,
    /// Recorded value
    pub value: LogValue,
}

impl HabitLog {
    pub fn new(date: NaiveDate, value: LogValue) -> Self {
        Self { date, value }
    }

    /// Date key in the stored `yyyy-MM-dd` format
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Parse a `yyyy-MM-dd` date
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a yyyy-MM-dd date", s)))
}
