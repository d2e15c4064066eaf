/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool, which shows every habit
/// with its schedule, whether it is due today, its streak and overall rate.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{habit_report, StatsView};
use crate::domain::is_due;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Only show habits due today
    #[serde(default)]
    pub due_today: Option<bool>,
    /// Sort by: 'name', 'streak', 'completion_rate' (default: stored order)
    pub sort_by: Option<String>,
}

/// Information about a habit in the listing
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub schedule: String,
    pub completion_type: String,
    pub due_today: bool,
    pub current_streak: u32,
    /// Overall completion rate, 0-100
    pub completion_rate: f64,
    pub total_logs: usize,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub total_habits: usize,
    pub due_today: usize,
    /// Mean of the overall completion rates
    pub avg_completion_rate: f64,
}

/// List habits with their current standing
pub fn list_habits<S: HabitStorage>(
    storage: &S,
    params: ListHabitsParams,
    today: NaiveDate,
) -> Result<ListHabitsResponse, ToolError> {
    let habits = storage.load_or_default()?;
    let total_habits = habits.len();

    let mut summaries: Vec<HabitSummary> = habits
        .iter()
        .map(|habit| {
            let report = habit_report(habit, today);
            HabitSummary {
                id: habit.id.to_string(),
                name: habit.name.clone(),
                schedule: habit.schedule_display(),
                completion_type: habit.completion_type.as_str().to_string(),
                due_today: is_due(habit, today),
                current_streak: report.streak.current_streak,
                completion_rate: report.rate(StatsView::Overall),
                total_logs: habit.logs.len(),
            }
        })
        .collect();

    let due_today = summaries.iter().filter(|s| s.due_today).count();
    let avg_completion_rate = if summaries.is_empty() {
        0.0
    } else {
        summaries.iter().map(|s| s.completion_rate).sum::<f64>() / summaries.len() as f64
    };

    if params.due_today.unwrap_or(false) {
        summaries.retain(|s| s.due_today);
    }

    match params.sort_by.as_deref().map(str::trim) {
        None | Some("") => {}
        Some("name") => summaries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        Some("streak") => summaries.sort_by(|a, b| b.current_streak.cmp(&a.current_streak)),
        Some("completion_rate") => summaries.sort_by(|a, b| b.completion_rate.total_cmp(&a.completion_rate)),
        Some(other) => {
            return Err(ToolError::InvalidInput(format!(
                "Invalid sort_by '{}'. Valid options: name, streak, completion_rate",
                other
            )))
        }
    }

    Ok(ListHabitsResponse {
        habits: summaries,
        total_habits,
        due_today,
        avg_completion_rate,
    })
}

impl ListHabitsResponse {
    /// Render the listing for a tool result
    pub fn message(&self) -> String {
        if self.total_habits == 0 {
            return "No habits found. Create your first habit to get started!".to_string();
        }

        let header = format!("📋 **Habit Summary** ({} habits)\n\n", self.total_habits);
        let detailed_list = self
            .habits
            .iter()
            .map(|h| {
                format!(
                    "🎯 **{}** ({})\n   📅 {} | {} | 🔥 Streak: {} days | 📊 Rate: {:.1}%{}",
                    h.name,
                    h.id,
                    h.schedule,
                    h.completion_type,
                    h.current_streak,
                    h.completion_rate,
                    if h.due_today { " | ⏰ due today" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "{}{}\n\n📊 **Overall Stats**\n- Due today: {}\n- Average completion rate: {:.1}%",
            header, detailed_list, self.due_today, self.avg_completion_rate
        )
    }
}
