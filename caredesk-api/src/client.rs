//! The API client collaborator trait.

use crate::error::ApiResult;
use crate::session::Session;
use async_trait::async_trait;
use caredesk_types::{FilterParams, ResourceKind};
use serde::{Deserialize, Serialize};

/// One raw page of a collection response.
///
/// `count` is the total number of records matching the query, not the
/// number of items in this page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    pub items: Vec<serde_json::Value>,
    pub count: u64,
}

/// Abstract clinic API client.
///
/// Record payloads cross this boundary as raw JSON values; decoding into
/// typed entities is `caredesk-model`'s job. Ids are kind-erased integers
/// here for the same reason.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches one page of a collection. `page` is 1-based.
    async fn fetch_collection(
        &self,
        kind: ResourceKind,
        filters: &FilterParams,
        page: u32,
        page_size: u32,
        session: &Session,
    ) -> ApiResult<RawPage>;

    /// Fetches a single record by id.
    async fn fetch_by_id(
        &self,
        kind: ResourceKind,
        id: i64,
        session: &Session,
    ) -> ApiResult<serde_json::Value>;

    /// Creates a record from a draft payload, returning the new id.
    async fn create(
        &self,
        kind: ResourceKind,
        payload: &serde_json::Value,
        session: &Session,
    ) -> ApiResult<i64>;

    /// Replaces a record's mutable fields.
    async fn update(
        &self,
        kind: ResourceKind,
        id: i64,
        payload: &serde_json::Value,
        session: &Session,
    ) -> ApiResult<()>;

    /// Deletes a record.
    async fn delete(&self, kind: ResourceKind, id: i64, session: &Session) -> ApiResult<()>;
}
