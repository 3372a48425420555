/// Change fields of an existing todo

use std::sync::Arc;
use crate::domain::{Todo, TodoId, TodoPatch, TodoStatus};
use crate::storage::TodoRepository;
use crate::usecases::{load_existing, UseCaseError};

/// Input for updating a todo
///
/// `None` leaves a field as it is. `description: Some(None)` clears the
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoCommand {
    pub id: TodoId,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
}

impl UpdateTodoCommand {
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
        }
    }
}

pub struct UpdateTodo<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> UpdateTodo<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Apply the changes and store the result
    ///
    /// Nothing is written if the todo is missing or a change is rejected.
    pub async fn execute(&self, command: UpdateTodoCommand) -> Result<Todo, UseCaseError> {
        let mut todo = load_existing(self.repository.as_ref(), command.id).await?;

        todo.update(TodoPatch {
            title: command.title,
            description: command.description,
            status: command.status,
        })?;

        Ok(self.repository.update(&todo).await?)
    }
}
