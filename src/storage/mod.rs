/// Storage layer for persisting habit data
///
/// The whole habit collection is persisted as one keyed record, serialized
/// as JSON. This module defines the storage interface, the SQLite backend,
/// and the JSON import/export used for backups.

pub mod migrations;
pub mod sqlite;
pub mod transfer;

// Re-export the main storage types
pub use sqlite::*;
pub use transfer::*;

use thiserror::Error;
use crate::domain::Habit;

/// Record key holding the habit collection
pub const HABITS_KEY: &str = "habits-tracker-data";

/// Record key holding the user's display name
pub const USER_NAME_KEY: &str = "userName";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
///
/// Callers load a snapshot, build a new one, and save it back whole.
pub trait HabitStorage {
    /// Load the stored habit collection; `None` if nothing was ever saved
    fn load(&self) -> Result<Option<Vec<Habit>>, StorageError>;

    /// Replace the stored habit collection
    fn save(&self, habits: &[Habit]) -> Result<(), StorageError>;

    /// Read a plain text setting
    fn load_setting(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a plain text setting
    fn save_setting(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Load the collection, treating "never saved" as empty
    fn load_or_default(&self) -> Result<Vec<Habit>, StorageError> {
        Ok(self.load()?.unwrap_or_default())
    }
}
