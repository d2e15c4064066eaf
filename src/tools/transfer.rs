/// Tools for backing up and restoring the habit collection
///
/// This module implements the habit_export and habit_import MCP tools.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::{export_file_name, export_json, import_json, HabitStorage, StorageError};
use crate::tools::ToolError;

/// Parameters for exporting habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// Write the export to this file, or into this directory using the
    /// dated default file name. Returned inline if omitted.
    pub path: Option<String>,
}

/// Response from exporting habits
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub habit_count: usize,
    /// Where the export was written
    pub path: Option<String>,
    /// The exported document when no path was given
    pub data: Option<String>,
    pub message: String,
}

/// Export every habit as JSON
pub fn export_habits<S: HabitStorage>(
    storage: &S,
    params: ExportParams,
    today: NaiveDate,
) -> Result<ExportResponse, ToolError> {
    let habits = storage.load_or_default()?;
    let json = export_json(&habits).map_err(StorageError::from)?;

    match params.path.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            let mut target = PathBuf::from(path);
            if target.is_dir() {
                target.push(export_file_name(today));
            }
            fs::write(&target, &json)?;
            let path = target.display().to_string();

            tracing::info!("Exported {} habits to {}", habits.len(), path);
            Ok(ExportResponse {
                success: true,
                habit_count: habits.len(),
                message: format!("💾 Exported {} habits to {}", habits.len(), path),
                path: Some(path),
                data: None,
            })
        }
        None => Ok(ExportResponse {
            success: true,
            habit_count: habits.len(),
            message: format!(
                "💾 Exported {} habits (suggested file name: {})\n\n{}",
                habits.len(),
                export_file_name(today),
                json
            ),
            path: None,
            data: Some(json),
        }),
    }
}

/// Parameters for importing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ImportParams {
    /// Exported JSON document
    pub data: Option<String>,
    /// Path of an exported JSON file (used when `data` is omitted)
    pub path: Option<String>,
}

/// Response from importing habits
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub habit_count: usize,
    pub message: String,
}

/// Replace the stored collection with a validated import
pub fn import_habits<S: HabitStorage>(
    storage: &S,
    params: ImportParams,
) -> Result<ImportResponse, ToolError> {
    let text = match (params.data, params.path) {
        (Some(data), _) => data,
        (None, Some(path)) => fs::read_to_string(path.trim())?,
        (None, None) => {
            return Err(ToolError::InvalidInput(
                "Provide either 'data' or 'path' to import".to_string(),
            ))
        }
    };

    let habits = import_json(&text)?;
    let replaced = storage.load_or_default()?.len();
    storage.save(&habits)?;

    tracing::info!("Imported {} habits, replacing {}", habits.len(), replaced);
    Ok(ImportResponse {
        success: true,
        habit_count: habits.len(),
        message: format!(
            "📥 Imported {} habits (replaced {} existing)",
            habits.len(),
            replaced
        ),
    })
}
