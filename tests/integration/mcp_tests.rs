/// JSON-RPC handling of the MCP server, driven line by line
use habits_tracker::mcp::protocol::error_codes;
use habits_tracker::{HabitStorage, HabitTrackerServer, McpServer, SqliteStorage};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

fn server() -> McpServer {
    let storage = SqliteStorage::in_memory().expect("Failed to open in-memory storage");
    McpServer::new(HabitTrackerServer::with_storage(storage))
}

async fn call(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    });
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("tools/call must produce a response");
    assert!(response.error.is_none());
    assert_eq!(response.id, json!(id));
    response.result.expect("tools/call must produce a result")
}

fn text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_initialize_and_list_tools() {
    let mut server = server();

    let init = json!({
        "jsonrpc": "2.0", "id": 1, "method": "initialize",
        "params": {"protocolVersion": "2024-11-05", "capabilities": {},
                   "clientInfo": {"name": "test", "version": "0.0.1"}}
    });
    let response = server.process_line(&init.to_string()).await.unwrap();
    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], json!("2024-11-05"));
    assert!(result["capabilities"]["tools"].is_object());

    let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert!(server.process_line(&notification.to_string()).await.is_none());
    assert!(server.is_initialized());

    let list = json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"});
    let response = server.process_line(&list.to_string()).await.unwrap();
    let tools = response.result.unwrap()["tools"].as_array().cloned().unwrap();
    let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
    assert!(names.contains(&"habit_create"));
    assert!(names.contains(&"habit_calendar"));
    assert!(names.contains(&"habit_week"));
    assert!(names.contains(&"settings_update"));
    assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
}

#[tokio::test]
async fn test_tool_round_trip() {
    let mut server = server();

    let created = call(&mut server, 1, "habit_create", json!({"name": "Meditate"})).await;
    assert_eq!(created["isError"], json!(false));
    let habit_id = text(&created)
        .lines()
        .find_map(|line| line.strip_prefix("Habit ID: "))
        .map(str::to_string)
        .expect("create reports the habit id");

    let logged = call(&mut server, 2, "habit_log", json!({"habit_id": habit_id})).await;
    assert_eq!(logged["isError"], json!(false));
    assert!(text(&logged).contains("Current streak: 1 day"));

    let listed = call(&mut server, 3, "habit_list", json!({})).await;
    assert!(text(&listed).contains("Meditate"));

    let named = call(&mut server, 4, "settings_update", json!({"display_name": "Kai"})).await;
    assert_eq!(named["isError"], json!(false));
    let today = call(&mut server, 5, "habit_today", Value::Null).await;
    assert!(text(&today).contains("Hello, Kai!"));
    assert!(text(&today).contains("All habits done for today"));

    let exported = call(&mut server, 6, "habit_export", json!({})).await;
    assert!(text(&exported).contains(&habit_id));

    let deleted = call(&mut server, 7, "habit_delete", json!({"habit_id": habit_id})).await;
    assert_eq!(deleted["isError"], json!(false));
    let calendar = call(&mut server, 8, "habit_calendar", json!({"year": 2024, "month": 2})).await;
    assert!(text(&calendar).contains("February 2024"));
    let week = call(&mut server, 9, "habit_week", json!({"week_offset": -1})).await;
    assert_eq!(week["isError"], json!(false));
    assert!(text(&week).contains("Week of"));
}

#[tokio::test]
async fn test_tool_failures_are_error_results() {
    let mut server = server();

    let missing = call(&mut server, 1, "habit_log", json!({"habit_id": "nope"})).await;
    assert_eq!(missing["isError"], json!(true));
    assert!(text(&missing).contains("Habit not found"));

    let bad_args = call(&mut server, 2, "habit_create", json!({"name": 42})).await;
    assert_eq!(bad_args["isError"], json!(true));

    let unknown = call(&mut server, 3, "habit_forecast", json!({})).await;
    assert!(text(&unknown).contains("Unknown tool"));
}

#[tokio::test]
async fn test_protocol_errors() {
    let mut server = server();

    let response = server.process_line("{not json").await.unwrap();
    assert_eq!(response.error.unwrap().code, error_codes::PARSE_ERROR);

    let unknown = json!({"jsonrpc": "2.0", "id": 9, "method": "resources/list"});
    let response = server.process_line(&unknown.to_string()).await.unwrap();
    assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

    let no_params = json!({"jsonrpc": "2.0", "id": 10, "method": "tools/call"});
    let response = server.process_line(&no_params.to_string()).await.unwrap();
    assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);

    assert!(server.process_line("   ").await.is_none());
}

#[tokio::test]
async fn test_server_creation_on_file() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let server = HabitTrackerServer::new(temp_file.path().to_path_buf()).await.unwrap();
    assert!(server.storage().load().unwrap().is_none());
}
