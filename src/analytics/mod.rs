/// Analytics built on top of the recurrence engine
///
/// This module turns a snapshot of habits into the numbers the tools
/// report: completion rates per view, chart series, the monthly calendar
/// overview, the weekly tracker grid and today's progress. Everything here is pure.

pub mod calendar;
pub mod charts;
pub mod ranges;
pub mod week;

pub use calendar::*;
pub use charts::*;
pub use ranges::*;
pub use week::*;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{completion_rate, Habit, StreakSummary};

/// Completion rate of one habit for one view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewRate {
    pub view: StatsView,
    /// 0-100, unrounded
    pub rate: f64,
}

/// Rates for every view plus the streak summary of a habit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitReport {
    pub streak: StreakSummary,
    pub rates: Vec<ViewRate>,
}

impl HabitReport {
    pub fn rate(&self, view: StatsView) -> f64 {
        self.rates
            .iter()
            .find(|r| r.view == view)
            .map(|r| r.rate)
            .unwrap_or(0.0)
    }
}

/// Build the report for a single habit as of `today`
///
/// The overall rate covers `[created_at, today]` of this habit.
pub fn habit_report(habit: &Habit, today: NaiveDate) -> HabitReport {
    let rates = StatsView::ALL
        .iter()
        .map(|view| ViewRate {
            view: *view,
            rate: completion_rate(habit, view.date_range(today, std::slice::from_ref(habit))),
        })
        .collect();

    HabitReport {
        streak: StreakSummary::calculate(habit, today),
        rates,
    }
}

/// Round a rate for display
pub fn round_rate(rate: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (rate * factor).round() / factor
}
