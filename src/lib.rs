/// Public library interface for the Habits Tracker MCP server
///
/// This module exports the recurrence engine, the storage layer, the tool
/// functions and the server so they can be used by other applications or
/// tests.

use std::path::PathBuf;
use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod tools;

// Re-export the most used types
pub use domain::*;
pub use mcp::McpServer;
pub use storage::{HabitStorage, ImportError, SqliteStorage, StorageError};
pub use tools::ToolError;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habits tracker backed by a SQLite database
pub struct HabitTrackerServer {
    storage: SqliteStorage,
}

impl HabitTrackerServer {
    /// Open (and migrate) the database at `db_path`
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habits Tracker server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self { storage })
    }

    /// Wrap an already opened storage
    pub fn with_storage(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method returns when stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Fails early on an unreadable or corrupt store
        let habits = self.storage.load_or_default()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }
}
