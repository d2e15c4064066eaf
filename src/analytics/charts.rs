/// Per-day chart values, trend series and completion summary counts

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{Habit, HabitId};

/// Number of days in the trend series
pub const TREND_DAYS: i64 = 30;

/// Value plotted for `habit` on `date` (0-100)
///
/// No log plots as 0; boolean habits plot 100 for done.
pub fn chart_value(habit: &Habit, date: NaiveDate) -> u8 {
    habit
        .log_for(date)
        .map(|log| log.value.percent(habit.completion_type))
        .unwrap_or(0)
}

/// One habit's value in a chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitValue {
    pub habit_id: HabitId,
    pub name: String,
    pub value: u8,
}

/// All habits' values for one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub values: Vec<HabitValue>,
}

/// Chart points for every date in `dates`
pub fn daily_series(habits: &[Habit], dates: &[NaiveDate]) -> Vec<ChartPoint> {
    dates
        .iter()
        .map(|date| ChartPoint {
            date: *date,
            values: habits
                .iter()
                .map(|habit| HabitValue {
                    habit_id: habit.id.clone(),
                    name: habit.name.clone(),
                    value: chart_value(habit, *date),
                })
                .collect(),
        })
        .collect()
}

/// Chart points for the last 30 days ending at `today`
pub fn trend_series(habits: &[Habit], today: NaiveDate) -> Vec<ChartPoint> {
    let dates: Vec<NaiveDate> = (0..TREND_DAYS)
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect();
    daily_series(habits, &dates)
}

/// Per-habit count of logs that are `true` or a positive percentage
pub fn completion_counts(habits: &[Habit]) -> Vec<(HabitId, usize)> {
    habits
        .iter()
        .map(|habit| {
            let count = habit.logs.iter().filter(|log| log.value.is_positive()).count();
            (habit.id.clone(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompletionType, Frequency, HabitLog, LogValue};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(id: &str, completion_type: CompletionType, logs: Vec<HabitLog>) -> Habit {
        Habit::from_existing(
            HabitId::from_string(id),
            id.to_string(),
            Frequency::Daily,
            completion_type,
            vec![],
            logs,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_chart_values() {
        let day = date(2024, 3, 4);
        let boolean = habit("b", CompletionType::Boolean, vec![HabitLog::new(day, LogValue::Boolean(true))]);
        let percent = habit("p", CompletionType::Percentage, vec![HabitLog::new(day, LogValue::Percentage(35))]);

        assert_eq!(chart_value(&boolean, day), 100);
        assert_eq!(chart_value(&percent, day), 35);
        assert_eq!(chart_value(&percent, date(2024, 3, 5)), 0);
    }

    #[test]
    fn test_trend_series_covers_thirty_days() {
        let today = date(2024, 3, 10);
        let habits = vec![habit("b", CompletionType::Boolean, vec![HabitLog::new(today, LogValue::Boolean(true))])];

        let series = trend_series(&habits, today);
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().unwrap().date, today);
        assert_eq!(series.last().unwrap().values[0].value, 100);
        assert_eq!(series[0].date, today - Duration::days(29));
    }

    #[test]
    fn test_completion_counts() {
        let habits = vec![habit(
            "p",
            CompletionType::Percentage,
            vec![
                HabitLog::new(date(2024, 3, 4), LogValue::Percentage(0)),
                HabitLog::new(date(2024, 3, 5), LogValue::Percentage(10)),
                HabitLog::new(date(2024, 3, 6), LogValue::Boolean(true)),
            ],
        )];

        assert_eq!(completion_counts(&habits)[0].1, 2);
    }
}
