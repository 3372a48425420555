/// Remove a todo

use std::sync::Arc;
use crate::domain::TodoId;
use crate::storage::TodoRepository;
use crate::usecases::{load_existing, UseCaseError};

pub struct DeleteTodo<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> DeleteTodo<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fails with `TodoNotFound` if there is nothing to delete
    pub async fn execute(&self, id: TodoId) -> Result<(), UseCaseError> {
        // The repository's delete doesn't report missing rows
        load_existing(self.repository.as_ref(), id).await?;

        self.repository.delete(id).await?;
        Ok(())
    }
}
