/// JSON export and validated import of the habit collection
///
/// Import is all-or-nothing: every habit is shape-checked, decoded into the
/// strict domain types, and validated before anything is returned.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::Habit;

/// Errors produced while importing a habit collection
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Import is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Import must be a JSON array of habits")]
    NotAnArray,

    #[error("Habit #{index}: {message}")]
    InvalidHabit { index: usize, message: String },

    #[error("Habit #{index}: duplicate id '{id}'")]
    DuplicateId { index: usize, id: String },
}

/// Serialize the collection as pretty-printed JSON
pub fn export_json(habits: &[Habit]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(habits)
}

/// Suggested file name for an export made on `today`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("habits-tracker-data-{}.json", today.format("%Y-%m-%d"))
}

/// Parse and validate an exported collection
pub fn import_json(text: &str) -> Result<Vec<Habit>, ImportError> {
    let document: Value = serde_json::from_str(text)?;
    let items = match document {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotAnArray),
    };

    let mut habits = Vec::with_capacity(items.len());
    let mut ids = HashSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let invalid = |message: String| ImportError::InvalidHabit { index, message };

        let fields = item
            .as_object()
            .ok_or_else(|| invalid("expected an object".to_string()))?;
        check_shape(fields).map_err(invalid)?;

        let habit: Habit = serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;
        habit.validate().map_err(|e| invalid(e.to_string()))?;

        if !ids.insert(habit.id.clone()) {
            return Err(ImportError::DuplicateId { index, id: habit.id.to_string() });
        }
        habits.push(habit);
    }

    tracing::info!("Validated import of {} habits", habits.len());
    Ok(habits)
}

/// Field-level shape checks run before decoding
fn check_shape(fields: &Map<String, Value>) -> Result<(), String> {
    for key in ["id", "name"] {
        match fields.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            _ => return Err(format!("'{}' must be non-empty text", key)),
        }
    }

    match fields.get("frequency").and_then(Value::as_str) {
        Some("daily" | "weekly" | "custom") => {}
        _ => return Err("'frequency' must be one of daily, weekly, custom".to_string()),
    }

    match fields.get("completionType").and_then(Value::as_str) {
        Some("boolean" | "percentage") => {}
        _ => return Err("'completionType' must be one of boolean, percentage".to_string()),
    }

    let days = fields
        .get("selectedDays")
        .and_then(Value::as_array)
        .ok_or_else(|| "'selectedDays' must be an array".to_string())?;
    for day in days {
        match day.as_u64() {
            Some(d) if d <= 6 => {}
            _ => return Err(format!("'selectedDays' entry {} is not an integer 0-6", day)),
        }
    }

    if !fields.get("logs").map(Value::is_array).unwrap_or(false) {
        return Err("'logs' must be an array".to_string());
    }

    if !fields.get("createdAt").map(Value::is_string).unwrap_or(false) {
        return Err("'createdAt' must be a text timestamp".to_string());
    }

    Ok(())
}
