/// Todo entity
///
/// A todo owns its title, description, status and timestamps. All changes go
/// through the behavior methods below, which validate through the value
/// objects and only bump `updated_at` when something actually changed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::{DomainError, TodoId, TodoStatus, TodoTitle};

/// A single todo item
///
/// A todo without an id has never been stored. Equality follows identity:
/// stored todos compare by id, unstored ones only equal themselves.
#[derive(Debug, Clone)]
pub struct Todo {
    id: Option<TodoId>,
    title: TodoTitle,
    description: Option<String>,
    status: TodoStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields to change in `Todo::update`
///
/// `None` leaves a field alone. For `description`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
}

impl Todo {
    /// Create a new, unsaved todo
    ///
    /// The title is validated, the status starts as PENDING and both
    /// timestamps are set to now.
    pub fn create(title: &str, description: Option<&str>) -> Result<Self, DomainError> {
        Ok(Self::with_title(TodoTitle::create(title)?, description))
    }

    /// Create a new, unsaved todo from an already validated title
    pub fn with_title(title: TodoTitle, description: Option<&str>) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            title,
            description: normalize_description(description),
            status: TodoStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a stored todo without validating it
    ///
    /// Only the storage layer calls this, with data that was valid when it
    /// was written.
    pub(crate) fn reconstruct(
        id: TodoId,
        title: String,
        description: Option<String>,
        status: TodoStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            title: TodoTitle::reconstruct(title),
            description,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<TodoId> {
        self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TodoStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mark as COMPLETED; does nothing if already completed
    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status.is_completed() {
            return Ok(());
        }
        self.status = self.status.transition_to(TodoStatus::Completed)?;
        self.touch();
        Ok(())
    }

    /// Move back to PENDING; does nothing if already pending
    pub fn uncomplete(&mut self) -> Result<(), DomainError> {
        if self.status.is_pending() {
            return Ok(());
        }
        self.status = self.status.transition_to(TodoStatus::Pending)?;
        self.touch();
        Ok(())
    }

    /// COMPLETED goes back to PENDING, anything else becomes COMPLETED
    pub fn toggle_complete(&mut self) -> Result<(), DomainError> {
        if self.status.is_completed() {
            self.uncomplete()
        } else {
            self.complete()
        }
    }

    /// Move to `target` following the transition table
    ///
    /// Asking for the current status is a no-op rather than an error.
    pub fn change_status(&mut self, target: TodoStatus) -> Result<(), DomainError> {
        if self.status == target {
            return Ok(());
        }
        self.status = self.status.transition_to(target)?;
        self.touch();
        Ok(())
    }

    /// Replace the title; the new title is validated before comparing
    pub fn update_title(&mut self, title: &str) -> Result<(), DomainError> {
        let title = TodoTitle::create(title)?;
        if title == self.title {
            return Ok(());
        }
        self.title = title;
        self.touch();
        Ok(())
    }

    /// Replace the description; blank input clears it
    pub fn update_description(&mut self, description: Option<&str>) {
        let description = normalize_description(description);
        if description == self.description {
            return;
        }
        self.description = description;
        self.touch();
    }

    /// Apply several changes at once
    ///
    /// Fields are applied in the order title, description, status. If any
    /// of them fails the todo is left exactly as it was.
    pub fn update(&mut self, patch: TodoPatch) -> Result<(), DomainError> {
        let mut draft = self.clone();

        if let Some(title) = patch.title.as_deref() {
            draft.update_title(title)?;
        }
        if let Some(description) = patch.description.as_ref() {
            draft.update_description(description.as_deref());
        }
        if let Some(status) = patch.status {
            draft.change_status(status)?;
        }

        *self = draft;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn can_transition_to(&self, target: TodoStatus) -> bool {
        self.status.can_transition_to(target)
    }

    pub fn available_transitions(&self) -> Vec<TodoStatus> {
        self.status.available_transitions()
    }

    /// Serializable view of this todo, including derived fields
    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            id: self.id,
            title: self.title.value().to_string(),
            description: self.description.clone(),
            status: self.status,
            is_completed: self.is_completed(),
            available_transitions: self.available_transitions(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // updated_at never goes below created_at, even if the clock steps back
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => std::ptr::eq(self, other),
        }
    }
}

/// Trim a description and treat blank as missing
fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Read-only view of a todo handed to callers outside the domain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSnapshot {
    pub id: Option<TodoId>,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub is_completed: bool,
    pub available_transitions: Vec<TodoStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
