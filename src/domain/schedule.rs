/// Recurrence rules and completion-rate aggregation
///
/// `is_due` decides whether a habit is tracked on a date; `completion_rate`
/// averages fractional credit over the due dates of a caller-chosen range.

use chrono::NaiveDate;
use crate::domain::{weekday_index, Frequency, Habit};

/// Weekday index weekly habits are checked on (Monday)
pub const WEEKLY_ANCHOR_DAY: u8 = 0;

/// Check whether `habit` is due on `date`
pub fn is_due(habit: &Habit, date: NaiveDate) -> bool {
    match habit.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => weekday_index(date) == WEEKLY_ANCHOR_DAY,
        Frequency::Custom => habit.selected_days.contains(&weekday_index(date)),
        Frequency::Unrecognized => false,
    }
}

/// Percentage (0-100) of credit earned over the due dates in `dates`
///
/// Dates the habit is not due on are skipped. A date without a log earns
/// nothing; percentage logs earn fractional credit. Returns 0 when none of
/// the dates are due. The result is not rounded.
pub fn completion_rate<I>(habit: &Habit, dates: I) -> f64
where
    I: IntoIterator<Item = NaiveDate>,
{
    let logs = habit.log_index();
    let mut due_days = 0u32;
    let mut credit = 0.0;

    for date in dates.into_iter().filter(|d| is_due(habit, *d)) {
        due_days += 1;
        if let Some(value) = logs.get(&date) {
            credit += value.credit(habit.completion_type);
        }
    }

    if due_days == 0 {
        return 0.0;
    }
    credit / f64::from(due_days) * 100.0
}
