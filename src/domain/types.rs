/// Core types used alongside the Todo entity
///
/// This module defines the TodoId wrapper and the pagination/filter types
/// that list queries are expressed in.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::domain::TodoStatus;

/// Identifier assigned to a todo by the storage layer
///
/// A wrapper around the database row id so that ids can't be mixed up with
/// page numbers or counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page number used when the caller doesn't ask for one
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller doesn't ask for one
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Largest page size a single query may return
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Requested page of a list query; missing values fall back to defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Page number, at least 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Page size, clamped to 1..=MAX_PAGE_LIMIT
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
    }

    /// Number of rows to skip before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

/// Optional restrictions on a list query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
    /// Case-insensitive substring match on the title
    pub title_search: Option<String>,
}

impl TodoFilter {
    pub fn with_status(status: TodoStatus) -> Self {
        Self {
            status: Some(status),
            title_search: None,
        }
    }

    /// Search term with surrounding whitespace removed, if anything is left
    pub fn search_term(&self) -> Option<&str> {
        self.title_search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// One page of results plus the numbers needed to fetch the others
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        let limit = pagination.limit();
        Self {
            data,
            total,
            page: pagination.page(),
            limit,
            total_pages: total.div_ceil(u64::from(limit)),
        }
    }

    /// Convert every item, keeping the paging numbers
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
