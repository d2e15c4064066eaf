/// Monthly calendar overview and today's progress

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{days_between, month_bounds};
use crate::domain::{is_completed_on, is_due, weekday_index, DomainError, Habit};

/// How a calendar day is shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// No habit was due
    Idle,
    NoneCompleted,
    Partial,
    AllCompleted,
}

/// Completed-versus-due counts for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Habits due on this date
    pub total: usize,
    /// Due habits with a fully completed log
    pub completed: usize,
}

impl DaySummary {
    pub fn status(&self) -> DayStatus {
        if self.total == 0 {
            DayStatus::Idle
        } else if self.completed == self.total {
            DayStatus::AllCompleted
        } else if self.completed > 0 {
            DayStatus::Partial
        } else {
            DayStatus::NoneCompleted
        }
    }
}

/// Summarize all habits for one date
pub fn day_summary(habits: &[Habit], date: NaiveDate) -> DaySummary {
    let due: Vec<&Habit> = habits.iter().filter(|h| is_due(h, date)).collect();
    let completed = due.iter().filter(|h| is_completed_on(h, date)).count();

    DaySummary {
        date,
        total: due.len(),
        completed,
    }
}

/// A month laid out on a Monday-first grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the first day of the month
    pub leading_blanks: u8,
    pub days: Vec<DaySummary>,
}

/// Build the calendar overview for a month
pub fn month_calendar(habits: &[Habit], year: i32, month: u32) -> Result<MonthCalendar, DomainError> {
    let (first, last) = month_bounds(year, month)?;

    Ok(MonthCalendar {
        year,
        month,
        leading_blanks: weekday_index(first),
        days: days_between(first, last)
            .into_iter()
            .map(|date| day_summary(habits, date))
            .collect(),
    })
}

/// Habits due on `today`
pub fn todays_habits(habits: &[Habit], today: NaiveDate) -> Vec<&Habit> {
    habits.iter().filter(|h| is_due(h, today)).collect()
}

/// Progress across today's due habits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayProgress {
    pub completed: usize,
    pub total: usize,
    /// 0-100; 0 when nothing is due
    pub percent: f64,
    /// Every due habit completed (and at least one is due)
    pub all_completed: bool,
}

pub fn today_progress(habits: &[Habit], today: NaiveDate) -> TodayProgress {
    let summary = day_summary(habits, today);
    let percent = if summary.total > 0 {
        summary.completed as f64 / summary.total as f64 * 100.0
    } else {
        0.0
    };

    TodayProgress {
        completed: summary.completed,
        total: summary.total,
        percent,
        all_completed: summary.status() == DayStatus::AllCompleted,
    }
}
