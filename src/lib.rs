/// Public library interface for the Todo Tracker MCP server
///
/// The crate is layered: `domain` holds the todo rules, `storage` the
/// repository contract and its SQLite implementation, `usecases` the
/// operations built on both, and `tools`/`mcp` expose them to MCP clients.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

mod domain;
mod storage;
mod usecases;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{SqliteTodoRepository, StorageError, TodoRepository};
pub use usecases::*;
pub use tools::{ToolError, TodoResponse, MAX_DESCRIPTION_LENGTH};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Todo server that exposes the use cases over MCP
///
/// Owns the SQLite repository and hands shared references of it to each
/// tool call.
pub struct TodoTrackerServer {
    repository: Arc<SqliteTodoRepository>,
}

impl TodoTrackerServer {
    /// Create a new server backed by the database at `db_path`
    ///
    /// The schema is created or migrated if needed.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Todo Tracker server with database: {:?}", db_path);

        let repository = SqliteTodoRepository::new(db_path)?;

        Ok(Self {
            repository: Arc::new(repository),
        })
    }

    /// Create a server backed by a throwaway in-memory database
    pub fn in_memory() -> Result<Self, ServerError> {
        Ok(Self {
            repository: Arc::new(SqliteTodoRepository::in_memory()?),
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let total = self.repository.count(TodoFilter::default()).await?;
        tracing::info!("Server started successfully, found {} existing todos", total);

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Shared handle to the repository
    pub fn repository(&self) -> Arc<SqliteTodoRepository> {
        Arc::clone(&self.repository)
    }
}
