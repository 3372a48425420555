/// Tool for deleting todos
///
/// This module implements the todo_delete MCP tool.

use std::sync::Arc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::TodoRepository;
use crate::tools::{parse_id, ToolError};
use crate::usecases::DeleteTodo;

/// Parameters for deleting a todo
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteTodoParams {
    /// ID of the todo to delete
    pub id: i64,
}

/// Response from deleting a todo
#[derive(Debug, Serialize)]
pub struct DeleteTodoResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a todo using the provided repository
pub async fn delete_todo<R: TodoRepository + ?Sized>(
    repository: Arc<R>,
    params: DeleteTodoParams,
) -> Result<DeleteTodoResponse, ToolError> {
    let id = parse_id(params.id)?;
    DeleteTodo::new(repository).execute(id).await?;
    tracing::debug!("Todo {} deleted", id);

    Ok(DeleteTodoResponse {
        success: true,
        message: format!("🗑️ Deleted todo {}", id),
    })
}
