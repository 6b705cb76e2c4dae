//! Error types for column-preference storage.

use thiserror::Error;

/// Result type for column-preference operations.
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Errors from the preference store. Merging itself is total and has no
/// error cases.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// The underlying key-value store failed.
    #[error("preference storage error: {0}")]
    Storage(String),
}
