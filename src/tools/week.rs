/// Tool for the weekly tracker grid
///
/// This module implements the habit_week MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{week_view, WeekCell, WeekView};
use crate::domain::{weekday_label, CompletionType};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for the week grid
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct WeekParams {
    /// Weeks away from the current one: -1 is last week, 1 is next week
    pub week_offset: Option<i64>,
}

/// Response from the week grid
#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub week: WeekView,
    pub message: String,
}

fn cell_text(cell: &WeekCell, completion_type: CompletionType) -> String {
    if !cell.due {
        return "·".to_string();
    }
    match (cell.value, completion_type) {
        (Some(_), _) if cell.completed => "✓".to_string(),
        (Some(value), CompletionType::Percentage) => format!("{}%", value.percent(completion_type)),
        _ => "○".to_string(),
    }
}

/// Show each habit's due days and logs for one Monday-to-Sunday week
pub fn get_week<S: HabitStorage>(
    storage: &S,
    params: WeekParams,
    today: NaiveDate,
) -> Result<WeekResponse, ToolError> {
    let habits = storage.load_or_default()?;
    let week = week_view(&habits, today, params.week_offset.unwrap_or(0))?;

    let title = format!(
        "📅 Week of {} - {}",
        week.start.format("%b %-d"),
        week.end.format("%b %-d, %Y")
    );

    let message = if week.habits.is_empty() {
        format!("{}\n\nNo habits yet. Create one with habit_create.", title)
    } else {
        let header = (0..7)
            .map(|i| format!("{:>4}", weekday_label(i)))
            .collect::<String>();
        let rows = habits
            .iter()
            .zip(&week.habits)
            .map(|(habit, row)| {
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| format!("{:>4}", cell_text(cell, habit.completion_type)))
                    .collect::<String>();
                format!("{}\n{}", row.name, cells)
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}\n{}\n\n✓ done  ○ not done  · not due", title, header, rows)
    };

    Ok(WeekResponse { week, message })
}
