/// MCP tools for habit management
///
/// This module contains all the MCP tools that external clients can call to
/// interact with the habit tracker. Mutating tools load the stored snapshot,
/// build the next snapshot, and save it; read tools only load.

pub mod calendar;
pub mod create;
pub mod list;
pub mod log;
pub mod settings;
pub mod status;
pub mod today;
pub mod transfer;
pub mod update;
pub mod week;

// Re-export tool functions for easy access
pub use calendar::*;
pub use create::*;
pub use list::*;
pub use log::*;
pub use settings::*;
pub use status::*;
pub use today::*;
pub use transfer::*;
pub use update::*;
pub use week::*;

use thiserror::Error;

use crate::domain::{DomainError, Habit};
use crate::storage::{ImportError, StorageError};

/// Errors returned by tool functions
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

/// Locate a habit by full id or by an unambiguous id prefix
pub(crate) fn find_habit_index(habits: &[Habit], habit_id: &str) -> Result<usize, ToolError> {
    let wanted = habit_id.trim();
    let not_found = || ToolError::HabitNotFound { habit_id: wanted.to_string() };

    if wanted.is_empty() {
        return Err(ToolError::InvalidInput("Habit ID cannot be empty".to_string()));
    }

    if let Some(index) = habits.iter().position(|h| h.id.as_str() == wanted) {
        return Ok(index);
    }

    let mut matches = habits
        .iter()
        .enumerate()
        .filter(|(_, h)| h.id.as_str().starts_with(wanted));
    match (matches.next(), matches.next()) {
        (Some((index, _)), None) => Ok(index),
        (Some(_), Some(_)) => Err(ToolError::InvalidInput(format!(
            "Habit ID prefix '{}' matches more than one habit",
            wanted
        ))),
        _ => Err(not_found()),
    }
}
