/// Application use cases
///
/// Each use case wraps one business intent: it loads or builds a todo
/// through the repository, runs the entity behavior, and writes the result
/// back. Use cases keep no state between calls and never recover from
/// errors; whatever fails is returned to the caller as is.

pub mod create;
pub mod get;
pub mod list;
pub mod update;
pub mod delete;
pub mod toggle;

pub use create::*;
pub use get::*;
pub use list::*;
pub use update::*;
pub use delete::*;
pub use toggle::*;

use thiserror::Error;
use crate::domain::{DomainError, Todo, TodoId};
use crate::storage::{StorageError, TodoRepository};

/// Errors returned by use cases
#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl UseCaseError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            UseCaseError::Domain(err) => err.code(),
            UseCaseError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// The domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            UseCaseError::Domain(err) => Some(err),
            UseCaseError::Storage(_) => None,
        }
    }
}

/// Load a todo or fail with `TodoNotFound`
pub(crate) async fn load_existing<R>(repository: &R, id: TodoId) -> Result<Todo, UseCaseError>
where
    R: TodoRepository + ?Sized,
{
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::TodoNotFound { id }.into())
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory repository that records calls, for use case tests

    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use async_trait::async_trait;

    use crate::domain::{PaginatedResult, Pagination, Todo, TodoFilter, TodoId, TodoStatus};
    use crate::storage::{StorageError, TodoRepository};

    #[derive(Default)]
    pub struct RecordingRepository {
        todos: Mutex<BTreeMap<i64, Todo>>,
        next_id: Mutex<i64>,
        pub calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingRepository {
        /// Store a todo with the given id and status, bypassing `save`
        pub fn insert(&self, id: i64, title: &str, status: TodoStatus) -> Todo {
            let now = chrono::Utc::now();
            let todo = Todo::reconstruct(TodoId(id), title.to_string(), None, status, now, now);
            self.todos.lock().unwrap().insert(id, todo.clone());
            let mut next_id = self.next_id.lock().unwrap();
            *next_id = (*next_id).max(id);
            todo
        }

        pub fn stored(&self, id: i64) -> Option<Todo> {
            self.todos.lock().unwrap().get(&id).cloned()
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }

        /// Same filtering and ordering as the SQLite repository: newest first,
        /// ties broken by the higher id
        fn matching(&self, filter: &TodoFilter) -> Vec<Todo> {
            let mut todos: Vec<Todo> = self
                .todos
                .lock()
                .unwrap()
                .values()
                .filter(|todo| filter.status.map_or(true, |s| todo.status() == s))
                .filter(|todo| {
                    filter.search_term().map_or(true, |term| {
                        todo.title().value().to_lowercase().contains(&term.to_lowercase())
                    })
                })
                .cloned()
                .collect();
            todos.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.id().cmp(&a.id()))
            });
            todos
        }
    }

    #[async_trait]
    impl TodoRepository for RecordingRepository {
        async fn find_all(
            &self,
            pagination: Pagination,
            filter: TodoFilter,
        ) -> Result<PaginatedResult<Todo>, StorageError> {
            self.record("find_all");
            let all = self.matching(&filter);
            let total = all.len() as u64;
            let page = all
                .into_iter()
                .skip(pagination.offset() as usize)
                .take(pagination.limit() as usize)
                .collect();
            Ok(PaginatedResult::new(page, total, &pagination))
        }

        async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StorageError> {
            self.record("find_by_id");
            Ok(self.stored(id.value()))
        }

        async fn find_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>, StorageError> {
            self.record("find_by_status");
            Ok(self.matching(&TodoFilter::with_status(status)))
        }

        async fn save(&self, todo: &Todo) -> Result<Todo, StorageError> {
            self.record("save");
            if let Some(id) = todo.id() {
                return Err(StorageError::AlreadyPersisted { id });
            }
            let id = {
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                *next_id
            };
            let saved = Todo::reconstruct(
                TodoId(id),
                todo.title().value().to_string(),
                todo.description().map(str::to_string),
                todo.status(),
                todo.created_at(),
                todo.updated_at(),
            );
            self.todos.lock().unwrap().insert(id, saved.clone());
            Ok(saved)
        }

        async fn update(&self, todo: &Todo) -> Result<Todo, StorageError> {
            self.record("update");
            let id = todo.id().ok_or(StorageError::Unpersisted)?;
            let mut todos = self.todos.lock().unwrap();
            if !todos.contains_key(&id.value()) {
                return Err(StorageError::TodoNotFound { id });
            }
            todos.insert(id.value(), todo.clone());
            Ok(todo.clone())
        }

        async fn delete(&self, id: TodoId) -> Result<(), StorageError> {
            self.record("delete");
            self.todos.lock().unwrap().remove(&id.value());
            Ok(())
        }

        async fn count(&self, filter: TodoFilter) -> Result<u64, StorageError> {
            self.record("count");
            Ok(self.matching(&filter).len() as u64)
        }
    }
}
