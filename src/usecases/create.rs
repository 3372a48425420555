/// Create a new todo

use std::sync::Arc;
use crate::domain::{Todo, TodoTitle};
use crate::storage::TodoRepository;
use crate::usecases::UseCaseError;

/// Input for creating a todo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTodoCommand {
    /// A missing title is rejected the same way as an empty one
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct CreateTodo<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> CreateTodo<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and store a new todo, returning it with its assigned id
    pub async fn execute(&self, command: CreateTodoCommand) -> Result<Todo, UseCaseError> {
        let title = TodoTitle::from_optional(command.title.as_deref())?;
        let todo = Todo::with_title(title, command.description.as_deref());
        Ok(self.repository.save(&todo).await?)
    }
}
