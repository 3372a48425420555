/// End-to-end tests: use cases running against the SQLite repository
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio_test::{assert_err, assert_ok};
use todo_tracker_mcp::*;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn repository() -> Arc<SqliteTodoRepository> {
        Arc::new(SqliteTodoRepository::in_memory().expect("Failed to open database"))
    }

    async fn create(repo: &Arc<SqliteTodoRepository>, title: &str) -> Todo {
        let command = CreateTodoCommand {
            title: Some(title.to_string()),
            description: None,
        };
        assert_ok!(CreateTodo::new(repo.clone()).execute(command).await)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repository();
        let created = create(&repo, "장보기").await;
        let id = created.id().expect("saved todo has an id");

        let loaded = assert_ok!(GetTodoById::new(repo).execute(id).await);
        assert_eq!(loaded, created);
        assert_eq!(loaded.status(), TodoStatus::Pending);
        assert_eq!(loaded.description(), None);
    }

    #[tokio::test]
    async fn test_completed_todo_cannot_start_progress() {
        let repo = repository();
        let id = create(&repo, "장보기").await.id().unwrap();
        assert_ok!(ToggleTodo::new(repo.clone()).execute(id).await);

        let mut command = UpdateTodoCommand::new(id);
        command.status = Some(TodoStatus::InProgress);
        let err = assert_err!(UpdateTodo::new(repo.clone()).execute(command).await);

        assert_eq!(
            err.as_domain(),
            Some(&DomainError::InvalidStatusTransition {
                current: TodoStatus::Completed,
                target: TodoStatus::InProgress,
            })
        );
        let stored = assert_ok!(GetTodoById::new(repo).execute(id).await);
        assert!(stored.is_completed());
    }

    #[tokio::test]
    async fn test_toggle_twice() {
        let repo = repository();
        let id = create(&repo, "장보기").await.id().unwrap();
        let toggle = ToggleTodo::new(repo);

        assert_eq!(assert_ok!(toggle.execute(id).await).status(), TodoStatus::Completed);
        assert_eq!(assert_ok!(toggle.execute(id).await).status(), TodoStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_missing_todo() {
        let repo = repository();
        let err = assert_err!(GetTodoById::new(repo).execute(TodoId(999)).await);
        assert_eq!(err.as_domain(), Some(&DomainError::TodoNotFound { id: TodoId(999) }));
    }

    #[tokio::test]
    async fn test_empty_title_update_leaves_todo_untouched() {
        let repo = repository();
        let created = create(&repo, "Original").await;
        let id = created.id().unwrap();

        let mut command = UpdateTodoCommand::new(id);
        command.title = Some(String::new());
        command.status = Some(TodoStatus::Completed);
        let err = assert_err!(UpdateTodo::new(repo.clone()).execute(command).await);
        assert_eq!(err.code(), "INVALID_TITLE");

        let stored = assert_ok!(GetTodoById::new(repo).execute(id).await);
        assert_eq!(stored.title().value(), "Original");
        assert_eq!(stored.status(), TodoStatus::Pending);
        assert_eq!(stored.updated_at(), created.updated_at());
    }

    #[tokio::test]
    async fn test_title_length_boundary() {
        let repo = repository();
        let create_todo = CreateTodo::new(repo);

        let exact = CreateTodoCommand {
            title: Some("a".repeat(100)),
            description: None,
        };
        assert_ok!(create_todo.execute(exact).await);

        let too_long = CreateTodoCommand {
            title: Some("a".repeat(101)),
            description: None,
        };
        let err = assert_err!(create_todo.execute(too_long).await);
        assert_eq!(err.code(), "INVALID_TITLE");
    }

    #[tokio::test]
    async fn test_delete_then_missing() {
        let repo = repository();
        let id = create(&repo, "Temporary").await.id().unwrap();
        let delete = DeleteTodo::new(repo);

        assert_ok!(delete.execute(id).await);
        let err = assert_err!(delete.execute(id).await);
        assert_eq!(err.code(), "TODO_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let repo = repository();
        for title in ["Buy milk", "Buy eggs", "Call mom"] {
            create(&repo, title).await;
        }
        let first = repo.find_by_status(TodoStatus::Pending).await.unwrap();
        assert_eq!(first.len(), 3);

        let list = GetTodos::new(repo);
        let all = assert_ok!(list.execute(None, None).await);
        assert_eq!(all.total, 3);
        assert_eq!(all.data[0].title().value(), "Call mom");

        let filter = TodoFilter {
            status: None,
            title_search: Some("BUY".to_string()),
        };
        let page = assert_ok!(list.execute(Some(Pagination::new(1, 1)), Some(filter)).await);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn test_server_persists_between_instances() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let server = TodoTrackerServer::new(db_path.clone())
            .await
            .expect("Failed to create first server");
        let id = create(&server.repository(), "Survives restart").await.id().unwrap();
        drop(server);

        let server = TodoTrackerServer::new(db_path)
            .await
            .expect("Failed to create second server");
        let loaded = assert_ok!(GetTodoById::new(server.repository()).execute(id).await);
        assert_eq!(loaded.title().value(), "Survives restart");
    }

    #[test]
    fn test_repository_is_object_safe() {
        let repo: Arc<dyn TodoRepository> = repository();
        assert_eq!(Arc::strong_count(&repo), 1);
    }
}
