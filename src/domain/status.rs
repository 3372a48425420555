/// TodoStatus value object and its transition table
///
/// A todo moves between three states. There is no terminal state, but the
/// table is directed: a completed todo can only go back to pending.
///
/// | From        | Allowed to               |
/// |-------------|--------------------------|
/// | PENDING     | IN_PROGRESS, COMPLETED   |
/// | IN_PROGRESS | COMPLETED, PENDING       |
/// | COMPLETED   | PENDING                  |
///
/// Self-transitions are never in the table.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    /// Every status, in declaration order
    pub const ALL: [TodoStatus; 3] = [
        TodoStatus::Pending,
        TodoStatus::InProgress,
        TodoStatus::Completed,
    ];

    /// Wire/storage literal for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "PENDING",
            TodoStatus::InProgress => "IN_PROGRESS",
            TodoStatus::Completed => "COMPLETED",
        }
    }

    fn allowed_targets(&self) -> &'static [TodoStatus] {
        match self {
            TodoStatus::Pending => &[TodoStatus::InProgress, TodoStatus::Completed],
            TodoStatus::InProgress => &[TodoStatus::Completed, TodoStatus::Pending],
            TodoStatus::Completed => &[TodoStatus::Pending],
        }
    }

    pub fn can_transition_to(&self, target: TodoStatus) -> bool {
        *self != target && self.allowed_targets().contains(&target)
    }

    /// Return the status after moving to `target`
    ///
    /// The receiver is left as it is; callers replace their copy with the
    /// returned value.
    pub fn transition_to(&self, target: TodoStatus) -> Result<TodoStatus, DomainError> {
        if !self.can_transition_to(target) {
            return Err(DomainError::InvalidStatusTransition {
                current: *self,
                target,
            });
        }
        Ok(target)
    }

    pub fn available_transitions(&self) -> Vec<TodoStatus> {
        self.allowed_targets().to_vec()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TodoStatus::Pending)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, TodoStatus::InProgress)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TodoStatus::Completed)
    }
}

impl FromStr for TodoStatus {
    type Err = DomainError;

    /// Parse one of the exact literals `PENDING`, `IN_PROGRESS`, `COMPLETED`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TodoStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatusLiteral(s.to_string()))
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
