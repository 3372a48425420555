/// Domain module containing core business logic and data types
///
/// This module defines the Todo entity, the TodoTitle and TodoStatus value
/// objects, and the error taxonomy they report. Nothing in here performs I/O
/// or logging; failures are returned to the caller untouched.

pub mod title;
pub mod status;
pub mod todo;
pub mod types;

// Re-export public types for easy access
pub use title::*;
pub use status::*;
pub use todo::*;
pub use types::*;

use std::fmt;
use thiserror::Error;

/// Why a title was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleErrorReason {
    /// Nothing left after trimming (or no title at all)
    Empty,
    /// Fewer than `TodoTitle::MIN_LENGTH` characters
    TooShort,
    /// More than `TodoTitle::MAX_LENGTH` characters
    TooLong,
}

impl fmt::Display for TitleErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleErrorReason::Empty => write!(f, "Title cannot be empty"),
            TitleErrorReason::TooShort => write!(
                f,
                "Title must be at least {} character(s)",
                TodoTitle::MIN_LENGTH
            ),
            TitleErrorReason::TooLong => write!(
                f,
                "Title cannot be longer than {} characters",
                TodoTitle::MAX_LENGTH
            ),
        }
    }
}

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid title: {reason}")]
    InvalidTitle { value: String, reason: TitleErrorReason },

    #[error("Cannot change status from {current} to {target}")]
    InvalidStatusTransition { current: TodoStatus, target: TodoStatus },

    #[error("Todo not found: {id}")]
    TodoNotFound { id: TodoId },

    #[error("Invalid status '{0}'. Valid options: PENDING, IN_PROGRESS, COMPLETED")]
    InvalidStatusLiteral(String),
}

impl DomainError {
    /// Stable machine-readable code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidTitle { .. } => "INVALID_TITLE",
            DomainError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            DomainError::TodoNotFound { .. } => "TODO_NOT_FOUND",
            DomainError::InvalidStatusLiteral(_) => "INVALID_STATUS_LITERAL",
        }
    }
}
