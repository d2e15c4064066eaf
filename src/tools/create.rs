/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionType, Frequency, Habit};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

fn default_frequency() -> String {
    "daily".to_string()
}

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit (e.g. "Drink water")
    pub name: String,
    /// How often: daily, weekly (Mondays) or custom
    #[serde(default = "default_frequency")]
    pub frequency: String,
    /// How completion is logged: boolean (default) or percentage
    #[serde(default)]
    pub completion_type: Option<String>,
    /// Weekday indices for custom habits, 0 = Monday … 6 = Sunday
    #[serde(default)]
    pub selected_days: Option<Vec<u8>>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub success: bool,
    pub habit_id: Option<String>,
    pub message: String,
}

/// Create a new habit and append it to the stored collection
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let frequency = Frequency::parse(&params.frequency)?;
    let completion_type = match params.completion_type.as_deref() {
        Some(s) => CompletionType::parse(s)?,
        None => CompletionType::Boolean,
    };

    let habit = Habit::new(
        params.name,
        frequency,
        completion_type,
        params.selected_days.unwrap_or_default(),
    )?;

    let mut habits = storage.load_or_default()?;
    let message = format!(
        "✅ Created habit '{}' ({}, {})! Ready to start your streak!",
        habit.name,
        habit.schedule_display(),
        habit.completion_type.as_str()
    );
    let habit_id = habit.id.to_string();

    tracing::info!("Creating habit {} ({})", habit.name, habit_id);
    habits.push(habit);
    storage.save(&habits)?;

    Ok(CreateHabitResponse {
        success: true,
        habit_id: Some(habit_id),
        message,
    })
}
