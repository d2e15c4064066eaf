/// Monday-to-Sunday tracker grid for all habits

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::analytics::{days_between, week_start};
use crate::domain::{is_due, DomainError, Habit, HabitId, LogValue};

/// One habit on one day of the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub due: bool,
    /// Logged value, kept even when the habit was not due
    pub value: Option<LogValue>,
    pub completed: bool,
}

/// One habit's row across the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitWeek {
    pub habit_id: HabitId,
    pub name: String,
    pub cells: Vec<WeekCell>,
}

/// Every habit across one Monday-start week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub habits: Vec<HabitWeek>,
}

/// Monday of the week `offset` weeks away from the week containing `today`
///
/// Negative offsets go back in time.
pub fn shifted_week_start(today: NaiveDate, offset: i64) -> Result<NaiveDate, DomainError> {
    let out_of_range = || DomainError::InvalidDate(format!("week offset {} is out of range", offset));
    let days = offset.unsigned_abs().checked_mul(7).ok_or_else(out_of_range)?;
    let start = week_start(today);

    if offset < 0 {
        start.checked_sub_days(Days::new(days))
    } else {
        start.checked_add_days(Days::new(days))
    }
    .ok_or_else(out_of_range)
}

/// Build the week grid `offset` weeks from the current one
pub fn week_view(habits: &[Habit], today: NaiveDate, offset: i64) -> Result<WeekView, DomainError> {
    let start = shifted_week_start(today, offset)?;
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| DomainError::InvalidDate(format!("week offset {} is out of range", offset)))?;
    let dates = days_between(start, end);

    let habits = habits
        .iter()
        .map(|habit| HabitWeek {
            habit_id: habit.id.clone(),
            name: habit.name.clone(),
            cells: dates
                .iter()
                .map(|date| {
                    let value = habit.log_for(*date).map(|log| log.value);
                    WeekCell {
                        date: *date,
                        due: is_due(habit, *date),
                        value,
                        completed: value.map_or(false, |v| v.is_complete(habit.completion_type)),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(WeekView { start, end, habits })
}
