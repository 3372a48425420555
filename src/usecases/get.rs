/// Look up a single todo

use std::sync::Arc;
use crate::domain::{Todo, TodoId};
use crate::storage::TodoRepository;
use crate::usecases::{load_existing, UseCaseError};

pub struct GetTodoById<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> GetTodoById<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fails with `TodoNotFound` when no todo has this id
    pub async fn execute(&self, id: TodoId) -> Result<Todo, UseCaseError> {
        load_existing(self.repository.as_ref(), id).await
    }
}
