/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HabitLog) and the recurrence,
/// completion-rate and streak rules that operate on them. Everything here is
/// pure: functions read a caller-owned snapshot and never touch storage.

pub mod habit;
pub mod log;
pub mod schedule;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use log::*;
pub use schedule::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid weekday index {0} (expected 0 = Monday through 6 = Sunday)")]
    InvalidDay(u8),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
