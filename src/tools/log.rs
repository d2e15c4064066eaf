/// Tool for logging habit completions
///
/// This module implements the habit_log MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{current_streak, parse_date, CompletionType, LogValue};
use crate::storage::HabitStorage;
use crate::tools::{find_habit_index, ToolError};

/// Parameters for logging a habit outcome
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogHabitParams {
    /// ID (or unique ID prefix) of the habit to log
    pub habit_id: String,
    /// Date to log (yyyy-MM-dd); defaults to today
    pub date: Option<String>,
    /// true/false for boolean habits, 0-100 for percentage habits.
    /// Defaults to true (boolean) or 100 (percentage).
    pub value: Option<Value>,
}

/// Response from logging a habit
#[derive(Debug, Serialize)]
pub struct LogHabitResponse {
    pub success: bool,
    pub message: String,
    pub current_streak: u32,
}

/// Turn a JSON value into a log value for a habit of `completion_type`
fn parse_value(value: Option<&Value>, completion_type: CompletionType) -> Result<LogValue, ToolError> {
    match (value, completion_type) {
        (None, CompletionType::Boolean) => Ok(LogValue::Boolean(true)),
        (None, CompletionType::Percentage) => Ok(LogValue::Percentage(100)),
        (Some(Value::Bool(done)), _) => Ok(LogValue::Boolean(*done)),
        (Some(Value::Number(n)), _) => match n.as_u64() {
            Some(v) if v <= 100 => Ok(LogValue::Percentage(v as u16)),
            _ => Err(ToolError::InvalidInput(format!(
                "Percentage must be an integer between 0 and 100, got {}",
                n
            ))),
        },
        (Some(other), _) => Err(ToolError::InvalidInput(format!(
            "Log value must be true/false or a number, got {}",
            other
        ))),
    }
}

/// Record the outcome of a habit for a date, replacing any earlier log
pub fn log_habit<S: HabitStorage>(
    storage: &S,
    params: LogHabitParams,
    today: NaiveDate,
) -> Result<LogHabitResponse, ToolError> {
    let mut habits = storage.load_or_default()?;
    let index = find_habit_index(&habits, &params.habit_id)?;

    let date = match params.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => today,
    };
    if date > today {
        return Err(ToolError::InvalidInput("Cannot log habits for future dates".to_string()));
    }

    let habit = &mut habits[index];
    let value = parse_value(params.value.as_ref(), habit.completion_type)?;
    habit.record_log(date, value)?;

    let streak = current_streak(habit, today);
    let message = format!(
        "🔥 Logged '{}' as {} for {}. Current streak: {} day{}",
        habit.name,
        value,
        date.format("%b %-d, %Y"),
        streak,
        if streak == 1 { "" } else { "s" }
    );

    storage.save(&habits)?;
    tracing::debug!("Logged {} for habit {} on {}", value, habits[index].id, date);

    Ok(LogHabitResponse {
        success: true,
        message,
        current_streak: streak,
    })
}
