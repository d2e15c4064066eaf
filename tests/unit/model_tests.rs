/// Habit model, log values and the import/export document format
use chrono::NaiveDate;
use habits_tracker::storage::{export_json, import_json};
use habits_tracker::*;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_habit_creation() {
    let habit = Habit::new(
        "  Drink water ".to_string(),
        Frequency::Custom,
        CompletionType::Percentage,
        vec![4, 0, 4],
    )
    .unwrap();

    assert_eq!(habit.name, "Drink water");
    assert_eq!(habit.selected_days, vec![0, 4]);
    assert!(habit.logs.is_empty());
    assert_eq!(habit.schedule_display(), "custom (Mon, Fri)");

    assert!(Habit::new("".to_string(), Frequency::Daily, CompletionType::Boolean, vec![]).is_err());
    assert!(Habit::new("Gym".to_string(), Frequency::Custom, CompletionType::Boolean, vec![]).is_err());
    assert!(Habit::new("Gym".to_string(), Frequency::Custom, CompletionType::Boolean, vec![7]).is_err());
}

#[test]
fn test_one_log_per_date() {
    let mut habit = Habit::new("Read".to_string(), Frequency::Daily, CompletionType::Percentage, vec![]).unwrap();
    habit.record_log(date(2024, 3, 4), LogValue::Percentage(20)).unwrap();
    habit.record_log(date(2024, 3, 4), LogValue::Percentage(80)).unwrap();

    assert_eq!(habit.logs.len(), 1);
    assert_eq!(habit.log_for(date(2024, 3, 4)).unwrap().value, LogValue::Percentage(80));
    assert!(habit.record_log(date(2024, 3, 5), LogValue::Percentage(101)).is_err());
}

#[test]
fn test_log_value_coercion() {
    assert_eq!(LogValue::Boolean(true).percent(CompletionType::Percentage), 100);
    assert_eq!(LogValue::Boolean(false).percent(CompletionType::Percentage), 0);
    assert_eq!(LogValue::Percentage(100).percent(CompletionType::Boolean), 0);
    assert!(LogValue::Percentage(100).is_complete(CompletionType::Percentage));
    assert!(!LogValue::Percentage(99).is_complete(CompletionType::Percentage));
}

#[test]
fn test_stored_layout() {
    let habit = Habit::from_existing(
        HabitId::from_string("abc"),
        "Walk".to_string(),
        Frequency::Weekly,
        CompletionType::Boolean,
        vec![],
        vec![HabitLog::new(date(2024, 3, 4), LogValue::Boolean(true))],
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2024, 3, 1, 0, 0, 0).unwrap(),
    );

    let value = serde_json::to_value(&habit).unwrap();
    assert_eq!(value["id"], json!("abc"));
    assert_eq!(value["completionType"], json!("boolean"));
    assert_eq!(value["selectedDays"], json!([]));
    assert_eq!(value["logs"], json!([{"date": "2024-03-04", "value": true}]));
}

#[test]
fn test_import_rejects_unknown_frequency() {
    let document = json!([{
        "id": "a", "name": "Stretch", "frequency": "monthly", "completionType": "boolean",
        "selectedDays": [], "logs": [], "createdAt": "2024-03-01T00:00:00Z"
    }])
    .to_string();
    assert!(matches!(import_json(&document), Err(ImportError::InvalidHabit { index: 0, .. })));
}

#[test]
fn test_export_import_reproduces_collection() {
    let mut habit = Habit::new("Journal".to_string(), Frequency::Daily, CompletionType::Boolean, vec![]).unwrap();
    habit.record_log(date(2024, 3, 4), LogValue::Boolean(true)).unwrap();
    habit.record_log(date(2024, 3, 5), LogValue::Boolean(false)).unwrap();

    let exported = export_json(std::slice::from_ref(&habit)).unwrap();
    assert_eq!(import_json(&exported).unwrap(), vec![habit]);
}
