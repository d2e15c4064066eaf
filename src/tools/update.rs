/// Tools for editing and deleting existing habits
///
/// This module implements the habit_update and habit_delete MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionType, Frequency};
use crate::storage::HabitStorage;
use crate::tools::{find_habit_index, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID (or unique ID prefix) of the habit to edit
    pub habit_id: String,
    pub name: Option<String>,
    /// daily, weekly or custom
    pub frequency: Option<String>,
    /// boolean or percentage; existing logs keep their values
    pub completion_type: Option<String>,
    /// Weekday indices for custom habits, 0 = Monday … 6 = Sunday
    pub selected_days: Option<Vec<u8>>,
}

/// Response from updating or deleting a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: HabitStorage>(
    storage: &S,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let mut habits = storage.load_or_default()?;
    let index = find_habit_index(&habits, &params.habit_id)?;

    let frequency = params.frequency.as_deref().map(Frequency::parse).transpose()?;
    let completion_type = params
        .completion_type
        .as_deref()
        .map(CompletionType::parse)
        .transpose()?;

    let habit = &mut habits[index];
    habit.update(params.name, frequency, completion_type, params.selected_days)?;
    let message = format!("✅ Updated habit '{}' ({})", habit.name, habit.schedule_display());

    storage.save(&habits)?;

    Ok(UpdateHabitResponse {
        success: true,
        message,
    })
}

/// Parameters for deleting a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteHabitParams {
    /// ID (or unique ID prefix) of the habit to delete
    pub habit_id: String,
}

/// Remove a habit and all of its logs
pub fn delete_habit<S: HabitStorage>(
    storage: &S,
    params: DeleteHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let mut habits = storage.load_or_default()?;
    let index = find_habit_index(&habits, &params.habit_id)?;

    let removed = habits.remove(index);
    storage.save(&habits)?;

    tracing::info!("Deleted habit {} ({})", removed.name, removed.id);
    Ok(UpdateHabitResponse {
        success: true,
        message: format!("🗑️ Deleted habit '{}' and its {} logs", removed.name, removed.logs.len()),
    })
}
