/// SQLite persistence and tool workflows against a database file
use chrono::NaiveDate;
use habits_tracker::storage::{HABITS_KEY, USER_NAME_KEY};
use habits_tracker::tools::{
    create_habit, get_habit_status, get_today, import_habits, log_habit, CreateHabitParams,
    ImportParams, LogHabitParams, StatusParams, TodayParams,
};
use habits_tracker::*;
use serde_json::json;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_fresh_database_has_no_collection() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();

    assert!(storage.load().unwrap().is_none());
    assert!(storage.load_or_default().unwrap().is_empty());
    assert!(storage.load_setting(USER_NAME_KEY).unwrap().is_none());
    assert_eq!(HABITS_KEY, "habits-tracker-data");
}

#[test]
fn test_saved_collection_survives_reopen() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp_file.path().to_path_buf();

    let mut habit = Habit::new("Floss".to_string(), Frequency::Daily, CompletionType::Boolean, vec![]).unwrap();
    habit.record_log(date(2024, 3, 4), LogValue::Boolean(true)).unwrap();

    {
        let storage = SqliteStorage::new(path.clone()).unwrap();
        storage.save(std::slice::from_ref(&habit)).unwrap();
        storage.save_setting(USER_NAME_KEY, "Alex").unwrap();
    }

    let reopened = SqliteStorage::new(path).unwrap();
    assert_eq!(reopened.load().unwrap(), Some(vec![habit]));
    assert_eq!(reopened.load_setting(USER_NAME_KEY).unwrap().as_deref(), Some("Alex"));
}

#[test]
fn test_create_log_and_report() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();
    let today = date(2024, 3, 6);

    let created = create_habit(
        &storage,
        CreateHabitParams {
            name: "Practice piano".to_string(),
            frequency: "daily".to_string(),
            completion_type: Some("percentage".to_string()),
            selected_days: None,
        },
    )
    .unwrap();
    let habit_id = created.habit_id.unwrap();

    for (day, value) in [("2024-03-04", 100), ("2024-03-05", 100), ("2024-03-06", 50)] {
        log_habit(
            &storage,
            LogHabitParams {
                habit_id: habit_id.clone(),
                date: Some(day.to_string()),
                value: Some(json!(value)),
            },
            today,
        )
        .unwrap();
    }

    // Logged today but not fully done
    let status = get_habit_status(
        &storage,
        StatusParams { habit_id: Some(habit_id[..8].to_string()), ..Default::default() },
        today,
    )
    .unwrap();
    assert_eq!(status.habits[0].report.streak.current_streak, 0);
    assert_eq!(status.habits[0].report.streak.longest_streak, 2);

    let overview = get_today(&storage, TodayParams::default(), today).unwrap();
    assert_eq!(overview.progress.total, 1);
    assert_eq!(overview.progress.completed, 0);
    assert_eq!(overview.habits[0].logged.as_deref(), Some("50%"));
}

#[test]
fn test_rejected_import_saves_nothing() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let storage = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();
    let existing = Habit::new("Walk".to_string(), Frequency::Weekly, CompletionType::Boolean, vec![]).unwrap();
    storage.save(std::slice::from_ref(&existing)).unwrap();

    let document = json!([
        {"id": "a", "name": "Ok", "frequency": "daily", "completionType": "boolean",
         "selectedDays": [], "logs": [], "createdAt": "2024-03-01T00:00:00Z"},
        {"id": "b", "name": "Bad", "frequency": "daily", "completionType": "boolean",
         "selectedDays": [], "logs": [{"date": "2024-13-01", "value": true}],
         "createdAt": "2024-03-01T00:00:00Z"}
    ]);

    let result = import_habits(
        &storage,
        ImportParams { data: Some(document.to_string()), path: None },
    );
    assert!(result.is_err());
    assert_eq!(storage.load().unwrap(), Some(vec![existing]));
}
