/// Flip a todo between done and not done

use std::sync::Arc;
use crate::domain::{Todo, TodoId};
use crate::storage::TodoRepository;
use crate::usecases::{load_existing, UseCaseError};

pub struct ToggleTodo<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> ToggleTodo<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// COMPLETED becomes PENDING; PENDING and IN_PROGRESS become COMPLETED
    pub async fn execute(&self, id: TodoId) -> Result<Todo, UseCaseError> {
        let mut todo = load_existing(self.repository.as_ref(), id).await?;
        todo.toggle_complete()?;

        Ok(self.repository.update(&todo).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, TodoStatus};
    use crate::storage::TodoRepository;
    use crate::usecases::test_support::RecordingRepository;

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let repo = Arc::new(RecordingRepository::default());
        repo.insert(1, "장보기", TodoStatus::Pending);
        let toggle = ToggleTodo::new(repo.clone());

        assert_eq!(toggle.execute(TodoId(1)).await.unwrap().status(), TodoStatus::Completed);
        assert_eq!(toggle.execute(TodoId(1)).await.unwrap().status(), TodoStatus::Pending);
        assert_eq!(repo.stored(1).unwrap().status(), TodoStatus::Pending);
    }

    #[tokio::test]
    async fn test_toggle_in_progress_completes() {
        let repo = Arc::new(RecordingRepository::default());
        repo.insert(1, "Work", TodoStatus::InProgress);

        let todo = ToggleTodo::new(repo).execute(TodoId(1)).await.unwrap();
        assert!(todo.is_completed());
    }

    #[tokio::test]
    async fn test_toggle_missing() {
        let repo = Arc::new(RecordingRepository::default());
        let err = ToggleTodo::new(repo).execute(TodoId(3)).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::TodoNotFound { id: TodoId(3) }));
    }

    #[tokio::test]
    async fn test_works_with_trait_objects() {
        let repo = Arc::new(RecordingRepository::default());
        repo.insert(1, "Dyn", TodoStatus::Pending);
        let repo: Arc<dyn TodoRepository> = repo;

        let todo = ToggleTodo::new(repo).execute(TodoId(1)).await.unwrap();
        assert!(todo.is_completed());
    }
}
