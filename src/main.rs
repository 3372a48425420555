/// Main entry point for the Todo Tracker MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use todo_tracker_mcp::TodoTrackerServer;

/// Get the default database path, trying each candidate directory in turn
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".todo_tracker")),
        dirs::data_dir().map(|p| p.join("todo_tracker")),
        dirs::config_dir().map(|p| p.join("todo_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".todo_tracker")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() && is_writable(potential_path) {
            return Ok(potential_path.join("todos.db"));
        }
    }

    let temp_path = std::env::temp_dir().join("todo_tracker");
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join("todos.db"))
}

fn is_writable(dir: &Path) -> bool {
    let test_file = dir.join(".test_write");
    let writable = std::fs::write(&test_file, "test").is_ok();
    let _ = std::fs::remove_file(&test_file);
    writable
}

/// Command line arguments for the Todo Tracker MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
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

    tracing_subscriber::fmt()
        .with_env_filter(format!("todo_tracker_mcp={}", log_level))
        .with_writer(std::io::stderr) // stdout carries protocol frames
        .init();

    info!("Starting Todo Tracker MCP server");

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

    let server = TodoTrackerServer::new(db_path).await?;
    server.run().await?;

    info!("Todo Tracker MCP server shutdown complete");
    Ok(())
}
