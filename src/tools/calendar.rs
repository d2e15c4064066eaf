/// Tool for the monthly calendar overview
///
/// This module implements the habit_calendar MCP tool.

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{month_calendar, DayStatus, MonthCalendar};
use crate::domain::weekday_label;
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for the calendar overview
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CalendarParams {
    /// Year to show; defaults to the current year
    pub year: Option<i32>,
    /// Month to show (1-12); defaults to the current month
    pub month: Option<u32>,
}

/// Response from the calendar overview
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub calendar: MonthCalendar,
    pub message: String,
}

fn status_cell(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Idle => "·",
        DayStatus::NoneCompleted => "○",
        DayStatus::Partial => "◐",
        DayStatus::AllCompleted => "●",
    }
}

fn render(calendar: &MonthCalendar, title: &str) -> String {
    let header = (0..7).map(weekday_label).collect::<Vec<_>>().join(" ");
    let cells: Vec<String> = std::iter::repeat("    ".to_string())
        .take(calendar.leading_blanks as usize)
        .chain(
            calendar
                .days
                .iter()
                .map(|day| format!("{:>2}{} ", day.date.day(), status_cell(day.status()))),
        )
        .collect();
    let weeks = cells
        .chunks(7)
        .map(|week| week.concat().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🗓️ {}\n{}\n{}\n\n● all done  ◐ partial  ○ none done  · nothing due",
        title, header, weeks
    )
}

/// Show completed-versus-due counts for every day of a month
pub fn get_calendar<S: HabitStorage>(
    storage: &S,
    params: CalendarParams,
    today: NaiveDate,
) -> Result<CalendarResponse, ToolError> {
    let habits = storage.load_or_default()?;
    let year = params.year.unwrap_or_else(|| today.year());
    let month = params.month.unwrap_or_else(|| today.month());

    let calendar = month_calendar(&habits, year, month)?;
    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month));
    let message = render(&calendar, &title);

    Ok(CalendarResponse { calendar, message })
}
