/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the habit store
/// 3. Sends JSON-RPC responses to stdout

use chrono::{Local, NaiveDate};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HabitTrackerServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer {
    habit_tracker: HabitTrackerServer,
    /// Whether the client sent the initialized notification
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a JSON-RPC request
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request).await),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                if request.id.is_null() {
                    None
                } else {
                    Some(JsonRpcResponse::success(request.id, json!(null)))
                }
            }
            "tools/list" => Some(self.handle_tools_list(request).await),
            "tools/call" => Some(self.handle_tools_call(request).await),
            method if method.starts_with("notifications/") => {
                debug!("Ignoring notification {}", method);
                None
            }
            _ => Some(JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            )),
        }
    }

    /// Handle MCP initialization request
    async fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let client = request
            .params
            .and_then(|params| serde_json::from_value::<InitializeParams>(params).ok());
        match client {
            Some(params) => info!(
                "MCP client connected: {} (protocol {})",
                params.client_info.map(|c| c.name).unwrap_or_else(|| "unknown".to_string()),
                params.protocol_version
            ),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habits Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(request.id, &result)
    }

    /// Handle tools/list request
    async fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id, json!({ "tools": tool_definitions() }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let today = Local::now().date_naive();
        let result = match self.call_tool(&tool_params.name, tool_params.arguments, today) {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => {
                warn!(code = tool_error_code(&e), "Tool {} failed: {}", tool_params.name, e);
                ToolCallResult::error(e.to_string())
            }
        };

        to_response(request.id, &result)
    }

    /// Decode the arguments and run the named tool as of `today`
    fn call_tool(&self, name: &str, arguments: Option<Value>, today: NaiveDate) -> Result<String, ToolError> {
        let storage = self.habit_tracker.storage();

        match name {
            "habit_create" => {
                let response = tools::create_habit(storage, parse_arguments(arguments)?)?;
                Ok(match response.habit_id {
                    Some(habit_id) => format!("{}\nHabit ID: {}", response.message, habit_id),
                    None => response.message,
                })
            }
            "habit_update" => Ok(tools::update_habit(storage, parse_arguments(arguments)?)?.message),
            "habit_delete" => Ok(tools::delete_habit(storage, parse_arguments(arguments)?)?.message),
            "habit_log" => Ok(tools::log_habit(storage, parse_arguments(arguments)?, today)?.message),
            "habit_list" => Ok(tools::list_habits(storage, parse_arguments(arguments)?, today)?.message()),
            "habit_status" => Ok(tools::get_habit_status(storage, parse_arguments(arguments)?, today)?.message),
            "habit_today" => Ok(tools::get_today(storage, parse_arguments(arguments)?, today)?.message),
            "habit_calendar" => Ok(tools::get_calendar(storage, parse_arguments(arguments)?, today)?.message),
            "habit_week" => Ok(tools::get_week(storage, parse_arguments(arguments)?, today)?.message),
            "habit_export" => Ok(tools::export_habits(storage, parse_arguments(arguments)?, today)?.message),
            "habit_import" => Ok(tools::import_habits(storage, parse_arguments(arguments)?)?.message),
            "settings_update" => Ok(tools::update_settings(storage, parse_arguments(arguments)?)?.message),
            _ => Err(ToolError::InvalidInput(format!("Unknown tool: {}", name))),
        }
    }
}

/// Decode tool arguments; a missing argument object reads as `{}`
fn parse_arguments<T: DeserializeOwned>(arguments: Option<Value>) -> Result<T, ToolError> {
    serde_json::from_value(arguments.unwrap_or_else(|| json!({})))
        .map_err(|e| ToolError::InvalidInput(format!("Invalid arguments: {}", e)))
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every tool this server exposes
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool(
            "habit_create",
            "Create a new habit (daily, weekly on Mondays, or custom weekdays; boolean or percentage completion)",
            input_schema::<tools::CreateHabitParams>(),
        ),
        tool(
            "habit_update",
            "Edit a habit's name, frequency, completion type or custom days",
            input_schema::<tools::UpdateHabitParams>(),
        ),
        tool(
            "habit_delete",
            "Delete a habit and all of its logs",
            input_schema::<tools::DeleteHabitParams>(),
        ),
        tool(
            "habit_log",
            "Log a habit's outcome for today or a past date, replacing any earlier log for that date",
            input_schema::<tools::LogHabitParams>(),
        ),
        tool(
            "habit_list",
            "List all habits with their schedule, whether they are due today, streaks and completion rates",
            input_schema::<tools::ListHabitsParams>(),
        ),
        tool(
            "habit_status",
            "Check streaks and weekly, monthly and overall completion rates for one or all habits",
            input_schema::<tools::StatusParams>(),
        ),
        tool(
            "habit_today",
            "Show the habits due today, what has been logged and today's progress",
            input_schema::<tools::TodayParams>(),
        ),
        tool(
            "habit_calendar",
            "Show a month calendar with completed-versus-due habits per day",
            input_schema::<tools::CalendarParams>(),
        ),
        tool(
            "habit_week",
            "Show a Monday-to-Sunday grid of each habit's due days and logs, optionally weeks before or after this one",
            input_schema::<tools::WeekParams>(),
        ),
        tool(
            "habit_export",
            "Export all habits as JSON, inline or to a file",
            input_schema::<tools::ExportParams>(),
        ),
        tool(
            "habit_import",
            "Replace all habits with a previously exported JSON document",
            input_schema::<tools::ImportParams>(),
        ),
        tool(
            "settings_update",
            "Set the display name used in the daily greeting",
            input_schema::<tools::SettingsParams>(),
        ),
    ]
}
