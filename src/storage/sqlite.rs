/// SQLite implementation of the habit storage interface
///
/// This module stores keyed records in a single table. The habit collection
/// lives under `HABITS_KEY` as a JSON array; settings are plain text.

use std::path::PathBuf;
use rusqlite::{params, Connection, OptionalExtension};
use chrono::Utc;

use crate::domain::Habit;
use crate::storage::{migrations, HabitStorage, StorageError, HABITS_KEY};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Create a storage backed by a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn read_record(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_record(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

impl HabitStorage for SqliteStorage {
    fn load(&self) -> Result<Option<Vec<Habit>>, StorageError> {
        match self.read_record(HABITS_KEY)? {
            Some(json) => {
                let habits: Vec<Habit> = serde_json::from_str(&json)?;
                tracing::debug!("Loaded {} habits", habits.len());
                Ok(Some(habits))
            }
            None => Ok(None),
        }
    }

    fn save(&self, habits: &[Habit]) -> Result<(), StorageError> {
        let json = serde_json::to_string(habits)?;
        self.write_record(HABITS_KEY, &json)?;
        tracing::debug!("Saved {} habits", habits.len());
        Ok(())
    }

    fn load_setting(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read_record(key)
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_record(key, value)
    }
}
