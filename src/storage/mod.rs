/// Storage layer for persisting todos
///
/// This module defines the repository contract the use cases depend on and
/// a SQLite implementation of it. The domain never sees SQL; it only sees
/// `TodoRepository`.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::{PaginatedResult, Pagination, Todo, TodoFilter, TodoId, TodoStatus};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Todo not found: {id}")]
    TodoNotFound { id: TodoId },

    #[error("Todo has not been saved yet")]
    Unpersisted,

    #[error("Todo {id} is already saved")]
    AlreadyPersisted { id: TodoId },

    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Persistence contract for todos
///
/// Implementations must report a missing todo from `find_by_id` as
/// `Ok(None)`; turning absence into an error is the caller's decision.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List one page of todos, newest first
    async fn find_all(
        &self,
        pagination: Pagination,
        filter: TodoFilter,
    ) -> Result<PaginatedResult<Todo>, StorageError>;

    /// Get a todo by ID
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StorageError>;

    /// Get every todo with the given status
    async fn find_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>, StorageError>;

    /// Store a new todo and return it with its assigned id
    async fn save(&self, todo: &Todo) -> Result<Todo, StorageError>;

    /// Overwrite a stored todo
    async fn update(&self, todo: &Todo) -> Result<Todo, StorageError>;

    /// Delete a todo; deleting a missing id is not an error
    async fn delete(&self, id: TodoId) -> Result<(), StorageError>;

    /// Count todos matching the filter
    async fn count(&self, filter: TodoFilter) -> Result<u64, StorageError>;
}
