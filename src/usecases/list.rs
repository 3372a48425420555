/// List todos a page at a time

use std::sync::Arc;
use crate::domain::{PaginatedResult, Pagination, Todo, TodoFilter};
use crate::storage::TodoRepository;
use crate::usecases::UseCaseError;

pub struct GetTodos<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> GetTodos<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Missing pagination means page 1 of 10; missing filter means everything
    pub async fn execute(
        &self,
        pagination: Option<Pagination>,
        filter: Option<TodoFilter>,
    ) -> Result<PaginatedResult<Todo>, UseCaseError> {
        let result = self
            .repository
            .find_all(pagination.unwrap_or_default(), filter.unwrap_or_default())
            .await?;
        Ok(result)
    }
}
