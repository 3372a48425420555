/// MCP tools for todo management
///
/// This module is the boundary between raw tool arguments and the use
/// cases. It checks the shape of incoming arguments, runs the matching use
/// case, and maps failures to request-level outcomes (404/400/409/500).

pub mod create;
pub mod read;
pub mod update;
pub mod delete;

// Re-export tool functions for easy access
pub use create::*;
pub use read::*;
pub use update::*;
pub use delete::*;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::domain::{DomainError, TodoId, TodoSnapshot, TodoStatus};
use crate::storage::StorageError;
use crate::usecases::UseCaseError;

/// Longest description accepted from a caller
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Errors returned by tool calls
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

impl ToolError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::InvalidInput(_) => "INVALID_INPUT",
            ToolError::Domain(err) => err.code(),
            ToolError::UseCase(err) => err.code(),
        }
    }

    /// HTTP-style status for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ToolError::InvalidInput(_) => 400,
            ToolError::Domain(err) => domain_status_code(err),
            ToolError::UseCase(UseCaseError::Domain(err)) => domain_status_code(err),
            ToolError::UseCase(UseCaseError::Storage(StorageError::TodoNotFound { .. })) => 404,
            ToolError::UseCase(UseCaseError::Storage(_)) => 500,
        }
    }

    /// JSON body describing this error to the client
    pub fn to_payload(&self) -> Value {
        json!({
            "error": {
                "code": self.code(),
                "status": self.status_code(),
                "message": self.to_string(),
            }
        })
    }
}

fn domain_status_code(err: &DomainError) -> u16 {
    match err {
        DomainError::TodoNotFound { .. } => 404,
        DomainError::InvalidStatusTransition { .. } => 409,
        DomainError::InvalidTitle { .. } | DomainError::InvalidStatusLiteral(_) => 400,
    }
}

/// Response carrying a single todo
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub todo: TodoSnapshot,
    pub message: String,
}

/// Check that a caller-supplied id could be a row id
fn parse_id(raw: i64) -> Result<TodoId, ToolError> {
    if raw < 1 {
        return Err(ToolError::InvalidInput(format!(
            "id must be a positive integer, got {}",
            raw
        )));
    }
    Ok(TodoId(raw))
}

fn parse_status(raw: Option<&str>) -> Result<Option<TodoStatus>, ToolError> {
    match raw {
        Some(literal) => Ok(Some(literal.parse::<TodoStatus>()?)),
        None => Ok(None),
    }
}

fn check_description(description: Option<&str>) -> Result<(), ToolError> {
    if let Some(desc) = description {
        if desc.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ToolError::InvalidInput(format!(
                "description cannot be longer than {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }
    Ok(())
}

/// Deserialize a field that may be absent, null, or set
///
/// Used with `#[serde(default)]`: absent gives `None`, `null` gives
/// `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
