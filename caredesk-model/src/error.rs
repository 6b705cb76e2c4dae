//! Error types for the entity model.

use caredesk_api::ApiError;
use caredesk_query::QueryError;
use caredesk_types::ResourceKind;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while fetching or decoding entities.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A raw record did not satisfy the resource's read contract.
    #[error("invalid {kind} record: {detail}")]
    Validation {
        kind: ResourceKind,
        detail: String,
    },

    /// The API call itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A draft or update payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn validation(kind: ResourceKind, err: impl std::fmt::Display) -> Self {
        ModelError::Validation {
            kind,
            detail: err.to_string(),
        }
    }
}

impl From<ModelError> for QueryError {
    /// Model errors cross into query-cache entries as owned detail so the
    /// entries stay cloneable.
    fn from(err: ModelError) -> Self {
        QueryError::fetch(err.to_string())
    }
}
