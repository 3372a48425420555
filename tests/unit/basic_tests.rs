/// Unit tests against the public domain API
use todo_tracker_mcp::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_new_todo_defaults() {
        let todo = Todo::create("장보기", None).unwrap();

        assert_eq!(todo.status(), TodoStatus::Pending);
        assert_eq!(todo.description(), None);
        assert_eq!(todo.id(), None);
        assert!(todo.is_new());
        assert!(!todo.is_completed());
    }

    #[test]
    fn test_title_limits() {
        assert!(TodoTitle::create(&"a".repeat(100)).is_ok());

        let err = TodoTitle::create(&"a".repeat(101)).unwrap_err();
        assert_eq!(err.code(), "INVALID_TITLE");

        for blank in ["", "   ", "\n"] {
            assert!(matches!(
                TodoTitle::create(blank),
                Err(DomainError::InvalidTitle { reason: TitleErrorReason::Empty, .. })
            ));
        }
    }

    #[test]
    fn test_title_is_trimmed() {
        for raw in ["x", " x", "x ", "  hello world  "] {
            assert_eq!(TodoTitle::create(raw).unwrap().value(), raw.trim());
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("IN_PROGRESS".parse::<TodoStatus>(), Ok(TodoStatus::InProgress));
        assert!(matches!(
            "DONE".parse::<TodoStatus>(),
            Err(DomainError::InvalidStatusLiteral(_))
        ));
    }

    #[test]
    fn test_toggle_is_involution_from_pending() {
        let mut todo = Todo::create("장보기", None).unwrap();
        todo.toggle_complete().unwrap();
        assert_eq!(todo.status(), TodoStatus::Completed);
        todo.toggle_complete().unwrap();
        assert_eq!(todo.status(), TodoStatus::Pending);
    }

    #[test]
    fn test_same_status_change_keeps_timestamp() {
        let mut todo = Todo::create("Idle", None).unwrap();
        let before = todo.updated_at();
        todo.change_status(TodoStatus::Pending).unwrap();
        assert_eq!(todo.updated_at(), before);
    }

    #[test]
    fn test_description_blank_means_none() {
        let mut todo = Todo::create("Notes", Some("something")).unwrap();
        todo.update_description(Some(""));
        assert_eq!(todo.description(), None);

        todo.update_description(Some("again"));
        todo.update_description(None);
        assert_eq!(todo.description(), None);
    }

    #[test]
    fn test_unsaved_todos_are_distinct() {
        let a = Todo::create("Same", None).unwrap();
        let b = Todo::create("Same", None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), DEFAULT_PAGE);
        assert_eq!(pagination.limit(), DEFAULT_PAGE_LIMIT);

        let result: PaginatedResult<u8> = PaginatedResult::new(vec![], 25, &pagination);
        assert_eq!(result.total_pages, 3);
    }
}
