/// Tool for the daily overview
///
/// This module implements the habit_today MCP tool: the habits due today,
/// what has been logged for them so far and the overall progress.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{today_progress, todays_habits, TodayProgress};
use crate::domain::{current_streak, is_completed_on};
use crate::storage::{HabitStorage, USER_NAME_KEY};
use crate::tools::ToolError;

/// Name used when no display name was set
pub const DEFAULT_USER_NAME: &str = "User";

/// Parameters for the daily overview (none required)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TodayParams {}

/// A habit due today and its log state
#[derive(Debug, Serialize)]
pub struct TodayHabit {
    pub id: String,
    pub name: String,
    pub completion_type: String,
    /// Logged value as text, if logged today
    pub logged: Option<String>,
    pub completed: bool,
    pub current_streak: u32,
}

/// Response from the daily overview
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub greeting: String,
    pub date: NaiveDate,
    pub habits: Vec<TodayHabit>,
    pub progress: TodayProgress,
    pub message: String,
}

/// Build the overview of today's due habits
pub fn get_today<S: HabitStorage>(
    storage: &S,
    _params: TodayParams,
    today: NaiveDate,
) -> Result<TodayResponse, ToolError> {
    let habits = storage.load_or_default()?;
    let user_name = storage
        .load_setting(USER_NAME_KEY)?
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

    let due: Vec<TodayHabit> = todays_habits(&habits, today)
        .into_iter()
        .map(|habit| TodayHabit {
            id: habit.id.to_string(),
            name: habit.name.clone(),
            completion_type: habit.completion_type.as_str().to_string(),
            logged: habit.log_for(today).map(|log| log.value.to_string()),
            completed: is_completed_on(habit, today),
            current_streak: current_streak(habit, today),
        })
        .collect();
    let progress = today_progress(&habits, today);

    let greeting = format!("Hello, {}!", user_name);
    let message = if due.is_empty() {
        format!(
            "👋 {}\n\nNo habits for today. Start building better habits!",
            greeting
        )
    } else {
        let lines = due
            .iter()
            .map(|h| {
                let mark = if h.completed { "✅" } else { "⬜" };
                format!(
                    "{} {} ({}){}",
                    mark,
                    h.name,
                    h.id,
                    match &h.logged {
                        Some(value) if !h.completed => format!(" | logged {}", value),
                        _ => String::new(),
                    }
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let footer = if progress.all_completed {
            "🎉 All habits done for today!".to_string()
        } else {
            format!(
                "Progress: {} of {} done ({:.0}%)",
                progress.completed, progress.total, progress.percent
            )
        };
        format!(
            "👋 {}\n\n📅 {}\n{}\n\n{}",
            greeting,
            today.format("%A, %B %-d"),
            lines,
            footer
        )
    };

    Ok(TodayResponse {
        greeting,
        date: today,
        habits: due,
        progress,
        message,
    })
}
