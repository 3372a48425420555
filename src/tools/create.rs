/// Tool for creating new todos
///
/// This module implements the todo_create MCP tool.

use std::sync::Arc;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::storage::TodoRepository;
use crate::tools::{check_description, ToolError, TodoResponse};
use crate::usecases::{CreateTodo, CreateTodoCommand};

/// Parameters for creating a new todo
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateTodoParams {
    /// Title of the todo (1-100 characters)
    pub title: Option<String>,
    /// Optional longer description (up to 500 characters)
    pub description: Option<String>,
}

/// Create a new todo using the provided repository
pub async fn create_todo<R: TodoRepository + ?Sized>(
    repository: Arc<R>,
    params: CreateTodoParams,
) -> Result<TodoResponse, ToolError> {
    check_description(params.description.as_deref())?;

    let todo = CreateTodo::new(repository)
        .execute(CreateTodoCommand {
            title: params.title,
            description: params.description,
        })
        .await?;
    if let Some(id) = todo.id() {
        tracing::debug!("Todo {} created", id);
    }

    Ok(TodoResponse {
        message: format!("✅ Created todo '{}'", todo.title()),
        todo: todo.snapshot(),
    })
}
