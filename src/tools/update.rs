/// Tools for changing existing todos
///
/// This module implements the todo_update and todo_toggle MCP tools.

use std::sync::Arc;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::storage::TodoRepository;
use crate::tools::{check_description, double_option, parse_id, parse_status, ToolError, TodoResponse};
use crate::usecases::{ToggleTodo, UpdateTodo, UpdateTodoCommand};

/// Parameters for updating an existing todo
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTodoParams {
    /// ID of the todo to update
    pub id: i64,
    /// New title (1-100 characters)
    pub title: Option<String>,
    /// New description; null clears it, omitting it leaves it unchanged
    #[serde(default, deserialize_with = "double_option")]
    #[schemars(with = "Option<String>")]
    pub description: Option<Option<String>>,
    /// New status: PENDING, IN_PROGRESS or COMPLETED
    pub status: Option<String>,
}

/// Parameters for toggling completion
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleTodoParams {
    /// ID of the todo to toggle
    pub id: i64,
}

/// Update an existing todo using the provided repository
pub async fn update_todo<R: TodoRepository + ?Sized>(
    repository: Arc<R>,
    params: UpdateTodoParams,
) -> Result<TodoResponse, ToolError> {
    let id = parse_id(params.id)?;
    check_description(params.description.as_ref().and_then(|d| d.as_deref()))?;
    let status = parse_status(params.status.as_deref())?;

    let todo = UpdateTodo::new(repository)
        .execute(UpdateTodoCommand {
            id,
            title: params.title,
            description: params.description,
            status,
        })
        .await?;
    tracing::debug!("Todo {} updated", id);

    Ok(TodoResponse {
        message: format!("✅ Updated todo '{}'", todo.title()),
        todo: todo.snapshot(),
    })
}

/// Flip a todo between completed and pending
pub async fn toggle_todo<R: TodoRepository + ?Sized>(
    repository: Arc<R>,
    params: ToggleTodoParams,
) -> Result<TodoResponse, ToolError> {
    let id = parse_id(params.id)?;
    let todo = ToggleTodo::new(repository).execute(id).await?;
    tracing::debug!("Todo {} toggled to {}", id, todo.status());

    let message = if todo.is_completed() {
        format!("✅ Completed todo '{}'", todo.title())
    } else {
        format!("↩️ Reopened todo '{}'", todo.title())
    };

    Ok(TodoResponse {
        message,
        todo: todo.snapshot(),
    })
}
