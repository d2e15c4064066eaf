/// Tool for checking habit status and streaks
///
/// This module implements the habit_status MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{completion_counts, habit_report, trend_series, ChartPoint, HabitReport, StatsView};
use crate::domain::Habit;
use crate::storage::HabitStorage;
use crate::tools::{find_habit_index, ToolError};

/// Parameters for checking habit status
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// ID (or unique prefix) of one habit; all habits if omitted
    pub habit_id: Option<String>,
    /// Limit the reported rate to one view: week, month or overall
    pub view: Option<String>,
    /// Include the daily values of the last 30 days
    #[serde(default)]
    pub include_trend: Option<bool>,
}

/// Information about a single habit's status
#[derive(Debug, Serialize)]
pub struct HabitStatus {
    pub habit_id: String,
    pub name: String,
    pub report: HabitReport,
    /// Logs that are `true` or a positive percentage
    pub positive_logs: usize,
    pub status: String,
}

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStatus>,
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trend: Vec<ChartPoint>,
    pub message: String,
}

fn status_label(habit: &Habit, report: &HabitReport) -> &'static str {
    if habit.logs.is_empty() {
        "new"
    } else if report.streak.current_streak > 0 {
        "on_track"
    } else {
        "missed"
    }
}

/// Get streaks and completion rates for one or all habits
pub fn get_habit_status<S: HabitStorage>(
    storage: &S,
    params: StatusParams,
    today: NaiveDate,
) -> Result<StatusResponse, ToolError> {
    let habits = storage.load_or_default()?;
    let views = match params.view.as_deref() {
        Some(v) => vec![StatsView::parse(v)?],
        None => StatsView::ALL.to_vec(),
    };

    let selected: Vec<Habit> = match params.habit_id.as_deref() {
        Some(id) => vec![habits[find_habit_index(&habits, id)?].clone()],
        None => habits.clone(),
    };

    let counts = completion_counts(&habits);
    let statuses: Vec<HabitStatus> = selected
        .iter()
        .map(|habit| {
            let report = habit_report(habit, today);
            HabitStatus {
                habit_id: habit.id.to_string(),
                name: habit.name.clone(),
                positive_logs: counts
                    .iter()
                    .find(|(id, _)| *id == habit.id)
                    .map(|(_, count)| *count)
                    .unwrap_or(0),
                status: status_label(habit, &report).to_string(),
                report,
            }
        })
        .collect();

    let summary = if statuses.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let active_count = statuses.iter().filter(|h| h.report.streak.current_streak > 0).count();
        format!(
            "📊 Status: {} of {} habits on a streak. Total streak days: {}",
            active_count,
            statuses.len(),
            statuses.iter().map(|h| h.report.streak.current_streak).sum::<u32>()
        )
    };

    let details = statuses
        .iter()
        .map(|h| {
            let streak = &h.report.streak;
            let rates = views
                .iter()
                .map(|view| format!("{}: {:.1}%", view.label(), h.report.rate(*view)))
                .collect::<Vec<_>>()
                .join(" | ");
            format!(
                "🎯 {} ({})\n   Current streak: {} days | Best: {} days | Completed days: {}\n   {}{}\n   {}",
                h.name,
                h.habit_id,
                streak.current_streak,
                streak.longest_streak,
                streak.total_completions,
                rates,
                match streak.last_completed {
                    Some(last) => format!("\n   Last completed: {}", last),
                    None => String::new(),
                },
                streak.motivational_message()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let trend = if params.include_trend.unwrap_or(false) {
        trend_series(&selected, today)
    } else {
        Vec::new()
    };

    let mut message = format!("{}\n\n{}", summary, details);
    if !trend.is_empty() {
        let rows = trend
            .iter()
            .filter(|point| point.values.iter().any(|v| v.value > 0))
            .map(|point| {
                let values = point
                    .values
                    .iter()
                    .map(|v| format!("{} {}%", v.name, v.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("   {}: {}", point.date, values)
            })
            .collect::<Vec<_>>();
        message.push_str(&format!("\n\n📈 Last 30 days ({} active days)", rows.len()));
        if !rows.is_empty() {
            message.push('\n');
            message.push_str(&rows.join("\n"));
        }
    }

    Ok(StatusResponse {
        habits: statuses,
        summary,
        trend,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionType, Frequency, LogValue};
    use crate::tools::test_support::*;

    #[test]
    fn test_status_for_one_habit() {
        let today = date(2024, 3, 6);
        let mut h = habit("h1", Frequency::Daily, CompletionType::Percentage, vec![]);
        h.record_log(date(2024, 3, 5), LogValue::Percentage(100)).unwrap();
        h.record_log(date(2024, 3, 4), LogValue::Percentage(100)).unwrap();
        h.record_log(date(2024, 3, 3), LogValue::Percentage(50)).unwrap();
        let other = habit("h2", Frequency::Daily, CompletionType::Boolean, vec![]);
        let storage = storage_with(&[h, other]);

        let response = get_habit_status(
            &storage,
            StatusParams {
                habit_id: Some("h1".to_string()),
                view: Some("week".to_string()),
                include_trend: Some(true),
            },
            today,
        )
        .unwrap();

        assert_eq!(response.habits.len(), 1);
        let status = &response.habits[0];
        assert_eq!(status.report.streak.current_streak, 2);
        assert_eq!(status.positive_logs, 3);
        assert_eq!(status.status, "on_track");
        assert!(response.message.contains("This week"));
        assert!(!response.message.contains("Overall"));
        assert_eq!(response.trend.len(), 30);
        assert_eq!(response.trend[29].date, today);
        assert_eq!(response.trend[28].values[0].value, 100);
        assert!(response.message.contains("3 active days"));
    }

    #[test]
    fn test_status_for_all_habits() {
        let storage = storage_with(&[
            habit("h1", Frequency::Daily, CompletionType::Boolean, vec![]),
            habit("h2", Frequency::Weekly, CompletionType::Boolean, vec![]),
        ]);
        let response = get_habit_status(&storage, StatusParams::default(), date(2024, 3, 6)).unwrap();
        assert_eq!(response.habits.len(), 2);
        assert!(response.habits.iter().all(|h| h.status == "new"));

        assert!(response.trend.is_empty());

        let bad_view = StatusParams { view: Some("decade".to_string()), ..Default::default() };
        assert!(get_habit_status(&storage, bad_view, date(2024, 3, 6)).is_err());
    }
}
