/// Tools for reading todos
///
/// This module implements the todo_get and todo_list MCP tools.

use std::sync::Arc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{PaginatedResult, Pagination, TodoFilter, TodoSnapshot};
use crate::storage::TodoRepository;
use crate::tools::{parse_id, parse_status, ToolError, TodoResponse};
use crate::usecases::{GetTodoById, GetTodos};

/// Parameters for fetching a single todo
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTodoParams {
    /// ID of the todo
    pub id: i64,
}

/// Parameters for listing todos
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListTodosParams {
    /// Page number, starting at 1 (default 1)
    pub page: Option<u32>,
    /// Page size, 1-100 (default 10)
    pub limit: Option<u32>,
    /// Only todos with this status: PENDING, IN_PROGRESS or COMPLETED
    pub status: Option<String>,
    /// Only todos whose title contains this text (case-insensitive)
    pub title_search: Option<String>,
}

/// Response from listing todos
#[derive(Debug, Serialize)]
pub struct ListTodosResponse {
    #[serde(flatten)]
    pub result: PaginatedResult<TodoSnapshot>,
    pub message: String,
}

/// Get a single todo by id
pub async fn get_todo<R: TodoRepository + ?Sized>(
    repository: Arc<R>,
    params: GetTodoParams,
) -> Result<TodoResponse, ToolError> {
    let id = parse_id(params.id)?;
    let todo = GetTodoById::new(repository).execute(id).await?;

    Ok(TodoResponse {
        message: format!("📋 Todo '{}' is {}", todo.title(), todo.status()),
        todo: todo.snapshot(),
    })
}

/// List one page of todos
pub async fn list_todos<R: TodoRepository + ?Sized>(
    repository: Arc<R>,
    params: ListTodosParams,
) -> Result<ListTodosResponse, ToolError> {
    for (name, value) in [("page", params.page), ("limit", params.limit)] {
        if value == Some(0) {
            return Err(ToolError::InvalidInput(format!("{} must be at least 1", name)));
        }
    }

    let pagination = Pagination {
        page: params.page,
        limit: params.limit,
    };
    let filter = TodoFilter {
        status: parse_status(params.status.as_deref())?,
        title_search: params.title_search,
    };

    let result = GetTodos::new(repository)
        .execute(Some(pagination), Some(filter))
        .await?
        .map(|todo| todo.snapshot());

    let message = if result.total == 0 {
        "No todos found. Create your first todo to get started!".to_string()
    } else {
        format!(
            "📋 Page {} of {} ({} todos total)",
            result.page, result.total_pages, result.total
        )
    };

    Ok(ListTodosResponse { result, message })
}
