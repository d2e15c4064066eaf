/// Streak calculation and tracking functionality
///
/// This module computes the current run of fully completed days for a habit,
/// walking backward from today, and the `StreakSummary` shown by the status
/// tools.

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate};
use crate::domain::{Habit, HabitId};

/// Maximum number of days the backward walk inspects
pub const MAX_STREAK_LOOKBACK: u32 = 365;

/// Whether `habit` has a fully completed log on `date`
///
/// Boolean habits need `true`; percentage habits need 100. Partial
/// percentages never count toward a streak.
pub fn is_completed_on(habit: &Habit, date: NaiveDate) -> bool {
    habit
        .log_for(date)
        .map(|log| log.value.is_complete(habit.completion_type))
        .unwrap_or(false)
}

/// Count consecutive completed calendar days ending at today (or yesterday)
///
/// A missing log for today does not break the streak: counting starts from
/// yesterday instead. A log for today that is not complete ends the streak
/// at 0. The walk checks every calendar day, due or not, and stops after
/// `MAX_STREAK_LOOKBACK` days.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let start = match habit.log_for(today) {
        Some(log) if log.value.is_complete(habit.completion_type) => today,
        Some(_) => return 0,
        None => {
            let yesterday = today - Duration::days(1);
            if !is_completed_on(habit, yesterday) {
                return 0;
            }
            yesterday
        }
    };

    let logs = habit.log_index();
    let mut streak = 0;
    let mut checking_date = start;

    for _ in 0..MAX_STREAK_LOOKBACK {
        let completed = logs
            .get(&checking_date)
            .map(|value| value.is_complete(habit.completion_type))
            .unwrap_or(false);
        if !completed {
            break;
        }
        streak += 1;
        checking_date = checking_date - Duration::days(1);
    }

    streak
}

/// Calculated streak information for a habit
///
/// This struct holds the streak-related statistics reported for a habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Current consecutive completed days
    pub current_streak: u32,
    /// Longest run of consecutive completed days in the log history
    pub longest_streak: u32,
    /// Latest completed date (None if never completed)
    pub last_completed: Option<NaiveDate>,
    /// Number of completed days recorded
    pub total_completions: u32,
}

impl StreakSummary {
    /// Create an empty summary for a habit that hasn't been completed yet
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
            total_completions: 0,
        }
    }

    /// Calculate the summary for `habit` as of `today`
    pub fn calculate(habit: &Habit, today: NaiveDate) -> Self {
        let mut completed: Vec<NaiveDate> = habit
            .logs
            .iter()
            .filter(|log| log.value.is_complete(habit.completion_type))
            .map(|log| log.date)
            .collect();

        if completed.is_empty() {
            return Self::new(habit.id.clone());
        }

        completed.sort_unstable();
        completed.dedup();

        let current_streak = current_streak(habit, today);
        let longest_streak = Self::longest_run(&completed);

        Self {
            habit_id: habit.id.clone(),
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_completed: completed.last().copied(),
            total_completions: completed.len() as u32,
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current_streak),
            30..=99 => format!("Incredible! {} days of consistency. You're a habit master!", self.current_streak),
            _ => format!("Legendary! {} days of unwavering commitment. You're an inspiration!", self.current_streak),
        }
    }

    /// Longest run of consecutive calendar days in sorted, deduplicated dates
    fn longest_run(sorted_dates: &[NaiveDate]) -> u32 {
        let mut longest = 0;
        let mut current = 0;
        let mut last_date: Option<NaiveDate> = None;

        for date in sorted_dates {
            current = match last_date {
                Some(last) if (*date - last).num_days() == 1 => current + 1,
                _ => 1,
            };
            longest = longest.max(current);
            last_date = Some(*date);
        }

        longest
    }
}
