//! HTTP implementation of the API client.
//!
//! Collection endpoints paginate with `skip`/`limit` query parameters;
//! the 1-based page cursor the core uses is translated here.

use crate::client::{ApiClient, RawPage};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use async_trait::async_trait;
use caredesk_types::{FilterParams, ResourceKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpApiConfig {
    /// Base URL of the clinic API (e.g. `https://api.example-clinic.org`).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Wire shape of a created-record response.
#[derive(Debug, Deserialize)]
struct IdHolder {
    id: i64,
}

/// Clinic API client over HTTP.
pub struct HttpApiClient {
    config: HttpApiConfig,
    client: Client,
}

impl HttpApiClient {
    /// Creates a new HTTP API client.
    pub fn new(config: HttpApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    fn collection_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            kind.as_str()
        )
    }

    fn record_url(&self, kind: ResourceKind, id: i64) -> String {
        format!("{}/{id}", self.collection_url(kind))
    }

    /// Builds the query string for a collection fetch: filters in key
    /// order, then the skip/limit window derived from the page cursor.
    fn collection_query(filters: &FilterParams, page: u32, page_size: u32) -> String {
        let mut parts: Vec<String> = filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        let skip = u64::from(page_size) * u64::from(page.saturating_sub(1));
        parts.push(format!("skip={skip}"));
        parts.push(format!("limit={page_size}"));
        parts.join("&")
    }

    async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn fetch_collection(
        &self,
        kind: ResourceKind,
        filters: &FilterParams,
        page: u32,
        page_size: u32,
        session: &Session,
    ) -> ApiResult<RawPage> {
        let url = format!(
            "{}?{}",
            self.collection_url(kind),
            Self::collection_query(filters, page, page_size)
        );
        debug!(%kind, page, page_size, "fetching collection page");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("collection fetch failed: {e}")))?;

        let response = Self::check_status(response).await?;
        let raw: RawPage = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to parse collection page: {e}")))?;
        Ok(raw)
    }

    async fn fetch_by_id(
        &self,
        kind: ResourceKind,
        id: i64,
        session: &Session,
    ) -> ApiResult<serde_json::Value> {
        debug!(%kind, id, "fetching record");

        let response = self
            .client
            .get(self.record_url(kind, id))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("record fetch failed: {e}")))?;

        let response = Self::check_status(response).await?;
        let record = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to parse record: {e}")))?;
        Ok(record)
    }

    async fn create(
        &self,
        kind: ResourceKind,
        payload: &serde_json::Value,
        session: &Session,
    ) -> ApiResult<i64> {
        debug!(%kind, "creating record");

        let response = self
            .client
            .post(self.collection_url(kind))
            .bearer_auth(&session.access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("create failed: {e}")))?;

        let response = Self::check_status(response).await?;
        let holder: IdHolder = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to parse create response: {e}")))?;
        Ok(holder.id)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: i64,
        payload: &serde_json::Value,
        session: &Session,
    ) -> ApiResult<()> {
        debug!(%kind, id, "updating record");

        let response = self
            .client
            .put(self.record_url(kind, id))
            .bearer_auth(&session.access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("update failed: {e}")))?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, kind: ResourceKind, id: i64, session: &Session) -> ApiResult<()> {
        debug!(%kind, id, "deleting record");

        let response = self
            .client
            .delete(self.record_url(kind, id))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("delete failed: {e}")))?;

        Self::check_status(response).await?;
        Ok(())
    }
}
