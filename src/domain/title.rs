/// TodoTitle value object
///
/// Wraps a trimmed, length-checked title string. Once built, a title never
/// changes; replacing the title of a todo means building a new value.

use std::fmt;
use serde::Serialize;
use crate::domain::{DomainError, TitleErrorReason};

/// A validated todo title
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Minimum number of characters after trimming
    pub const MIN_LENGTH: usize = 1;
    /// Maximum number of characters after trimming
    pub const MAX_LENGTH: usize = 100;

    /// Build a title from user input
    ///
    /// The input is trimmed first. Length is counted in characters, not
    /// bytes, so multi-byte titles get the full 100 characters.
    pub fn create(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();

        let reason = if trimmed.is_empty() {
            Some(TitleErrorReason::Empty)
        } else if length < Self::MIN_LENGTH {
            Some(TitleErrorReason::TooShort)
        } else if length > Self::MAX_LENGTH {
            Some(TitleErrorReason::TooLong)
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidTitle {
                value: raw.to_string(),
                reason,
            }),
            None => Ok(Self(trimmed.to_string())),
        }
    }

    /// Build a title from input that may be missing entirely
    ///
    /// A missing title is rejected the same way as an empty one.
    pub fn from_optional(raw: Option<&str>) -> Result<Self, DomainError> {
        Self::create(raw.unwrap_or_default())
    }

    /// Wrap a stored title without validating it
    pub(crate) fn reconstruct(raw: String) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
