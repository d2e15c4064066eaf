/// Main entry point for the Habits Tracker MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use habits_tracker::HabitTrackerServer;

const DATA_DIR_NAME: &str = "habits_tracker";
const DATABASE_FILE: &str = "habits.db";

/// Pick the first writable location for the database
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(format!(".{}", DATA_DIR_NAME))),
        dirs::data_dir().map(|p| p.join(DATA_DIR_NAME)),
        dirs::config_dir().map(|p| p.join(DATA_DIR_NAME)),
        std::env::current_dir().ok().map(|p| p.join(format!(".{}", DATA_DIR_NAME))),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.join(DATABASE_FILE));
            }
        }
    }

    let temp_path = std::env::temp_dir().join(DATA_DIR_NAME);
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join(DATABASE_FILE))
}

/// Command line arguments for the Habits Tracker MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// (default: ~/.habits_tracker/habits.db)
    #[arg(long, env = "HABITS_TRACKER_DB")]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("habits_tracker={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Habits Tracker MCP server");

    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let server = HabitTrackerServer::new(db_path).await?;
    server.run().await?;

    info!("Habits Tracker MCP server shutdown complete");
    Ok(())
}
