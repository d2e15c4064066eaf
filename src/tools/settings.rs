/// Tool for user settings
///
/// This module implements the settings_update MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::{HabitStorage, USER_NAME_KEY};
use crate::tools::ToolError;

const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Parameters for updating settings
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SettingsParams {
    /// Name used in the daily greeting
    pub display_name: String,
}

/// Response from updating settings
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub message: String,
}

/// Store the display name
pub fn update_settings<S: HabitStorage>(
    storage: &S,
    params: SettingsParams,
) -> Result<SettingsResponse, ToolError> {
    let name = params.display_name.trim();
    if name.is_empty() {
        return Err(ToolError::InvalidInput("Display name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(ToolError::InvalidInput(format!(
            "Display name cannot exceed {} characters",
            MAX_DISPLAY_NAME_LENGTH
        )));
    }

    storage.save_setting(USER_NAME_KEY, name)?;

    Ok(SettingsResponse {
        success: true,
        message: format!("⚙️ Settings saved. Hello, {}!", name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::*;

    #[test]
    fn test_update_display_name() {
        let storage = storage_with(&[]);
        update_settings(&storage, SettingsParams { display_name: "  Robin ".to_string() }).unwrap();
        assert_eq!(storage.load_setting(USER_NAME_KEY).unwrap().as_deref(), Some("Robin"));

        assert!(update_settings(&storage, SettingsParams { display_name: " ".to_string() }).is_err());
        assert!(update_settings(&storage, SettingsParams { display_name: "x".repeat(51) }).is_err());
        assert_eq!(storage.load_setting(USER_NAME_KEY).unwrap().as_deref(), Some("Robin"));
    }
}
