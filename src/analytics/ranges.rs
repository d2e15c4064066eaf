/// Date ranges for the statistics views

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{weekday_index, DomainError, Habit};

/// Inclusive ascending list of calendar dates from `start` to `end`
///
/// Empty when `start` is after `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Monday of the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(weekday_index(date)))
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), DomainError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::InvalidDate(format!("{}-{:02} is not a valid month", year, month)))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| DomainError::InvalidDate(format!("{}-{:02} is out of range", year, month)))?;
    Ok((first, last))
}

/// `[created_at, today]` for a single habit
pub fn overall_range(habit: &Habit, today: NaiveDate) -> Vec<NaiveDate> {
    days_between(habit.created_on(), today)
}

/// Which span of days a statistics view covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsView {
    /// Monday-start week containing today
    Week,
    /// Calendar month containing today
    Month,
    /// Earliest habit creation through today
    Overall,
}

impl StatsView {
    pub const ALL: [StatsView; 3] = [StatsView::Week, StatsView::Month, StatsView::Overall];

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" => Ok(StatsView::Week),
            "month" | "monthly" => Ok(StatsView::Month),
            "overall" | "all" => Ok(StatsView::Overall),
            other => Err(DomainError::Validation {
                message: format!("Invalid view '{}'. Valid options: week, month, overall", other),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatsView::Week => "This week",
            StatsView::Month => "This month",
            StatsView::Overall => "Overall",
        }
    }

    /// Dates covered by this view as of `today`
    pub fn date_range(&self, today: NaiveDate, habits: &[Habit]) -> Vec<NaiveDate> {
        match self {
            StatsView::Week => {
                let start = week_start(today);
                days_between(start, start + Duration::days(6))
            }
            StatsView::Month => match month_bounds(today.year(), today.month()) {
                Ok((first, last)) => days_between(first, last),
                Err(_) => vec![today],
            },
            StatsView::Overall => {
                let earliest = habits
                    .iter()
                    .map(Habit::created_on)
                    .min()
                    .unwrap_or(today);
                days_between(earliest.min(today), today)
            }
        }
    }
}
