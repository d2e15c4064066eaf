/// Recurrence, completion-rate and streak behavior through the public API
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use habits_tracker::analytics::{days_between, StatsView};
use habits_tracker::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn habit(frequency: Frequency, completion_type: CompletionType, days: Vec<u8>, logs: Vec<HabitLog>) -> Habit {
    Habit::from_existing(
        HabitId::from_string("engine"),
        "Engine".to_string(),
        frequency,
        completion_type,
        days,
        logs,
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    )
}

fn done_on(dates: &[NaiveDate]) -> Vec<HabitLog> {
    dates
        .iter()
        .map(|d| HabitLog::new(*d, LogValue::Boolean(true)))
        .collect()
}

#[test]
fn test_daily_is_always_due() {
    let daily = habit(Frequency::Daily, CompletionType::Boolean, vec![], vec![]);
    for day in days_between(date(2024, 2, 20), date(2024, 3, 10)) {
        assert!(is_due(&daily, day));
    }
}

#[test]
fn test_weekly_is_due_on_mondays_only() {
    let weekly = habit(Frequency::Weekly, CompletionType::Boolean, vec![], vec![]);
    let start = date(2024, 1, 1);
    for day in days_between(start, start + Duration::days(8 * 7 - 1)) {
        assert_eq!(is_due(&weekly, day), day.weekday() == Weekday::Mon, "{}", day);
    }
}

#[test]
fn test_custom_days() {
    let custom = habit(Frequency::Custom, CompletionType::Boolean, vec![0, 2, 4], vec![]);
    let due: Vec<Weekday> = days_between(date(2024, 3, 4), date(2024, 3, 17))
        .into_iter()
        .filter(|d| is_due(&custom, *d))
        .map(|d| d.weekday())
        .collect();
    assert_eq!(
        due,
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri, Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );

    let unknown = habit(Frequency::Unrecognized, CompletionType::Boolean, vec![], vec![]);
    assert!(!is_due(&unknown, date(2024, 3, 4)));
}

#[test]
fn test_completion_rates() {
    let empty = habit(Frequency::Daily, CompletionType::Boolean, vec![], vec![]);
    assert_eq!(completion_rate(&empty, Vec::new()), 0.0);

    let dates = days_between(date(2024, 3, 4), date(2024, 3, 8));
    let boolean = habit(
        Frequency::Daily,
        CompletionType::Boolean,
        vec![],
        done_on(&dates[..3]),
    );
    assert_eq!(completion_rate(&boolean, dates.clone()), 60.0);

    let values = [100, 50, 0, 100];
    let logs = dates
        .iter()
        .zip(values)
        .map(|(d, v)| HabitLog::new(*d, LogValue::Percentage(v)))
        .collect();
    let percentage = habit(Frequency::Daily, CompletionType::Percentage, vec![], logs);
    assert_eq!(completion_rate(&percentage, dates[..4].to_vec()), 62.5);

    // Only due dates count toward the denominator
    let weekly = habit(Frequency::Weekly, CompletionType::Boolean, vec![], done_on(&[date(2024, 3, 4)]));
    assert_eq!(completion_rate(&weekly, days_between(date(2024, 3, 4), date(2024, 3, 17))), 50.0);
}

#[test]
fn test_streaks() {
    let today = date(2024, 3, 10);

    let five: Vec<NaiveDate> = (0..5).map(|i| today - Duration::days(i)).collect();
    let h = habit(Frequency::Daily, CompletionType::Boolean, vec![], done_on(&five));
    assert_eq!(current_streak(&h, today), 5);

    let previous_three: Vec<NaiveDate> = (1..4).map(|i| today - Duration::days(i)).collect();
    let h = habit(Frequency::Daily, CompletionType::Boolean, vec![], done_on(&previous_three));
    assert_eq!(current_streak(&h, today), 3);

    let mut logs = done_on(&(1..30).map(|i| today - Duration::days(i)).collect::<Vec<_>>());
    logs.push(HabitLog::new(today, LogValue::Boolean(false)));
    let h = habit(Frequency::Daily, CompletionType::Boolean, vec![], logs);
    assert_eq!(current_streak(&h, today), 0);
}

#[test]
fn test_engine_is_pure() {
    let today = date(2024, 3, 10);
    let h = habit(
        Frequency::Custom,
        CompletionType::Boolean,
        vec![1, 5],
        done_on(&[date(2024, 3, 9), date(2024, 3, 5)]),
    );
    let before = h.clone();

    let range = StatsView::Month.date_range(today, std::slice::from_ref(&h));
    assert_eq!(completion_rate(&h, range.clone()), completion_rate(&h, range));
    assert_eq!(current_streak(&h, today), current_streak(&h, today));
    assert_eq!(StreakSummary::calculate(&h, today), StreakSummary::calculate(&h, today));
    assert_eq!(h, before);
}
