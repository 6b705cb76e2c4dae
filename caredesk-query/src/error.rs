//! Error types for the query layer.

use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors observed through query-cache entries and relation slots.
///
/// Failed entries are stored as terminal state and handed to every caller
/// that observes them, so the error carries owned detail and stays cheaply
/// cloneable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The underlying fetch failed (network, server, or decode).
    #[error("fetch failed: {0}")]
    Fetch(String),
}

impl QueryError {
    pub fn fetch(detail: impl Into<String>) -> Self {
        QueryError::Fetch(detail.into())
    }
}
