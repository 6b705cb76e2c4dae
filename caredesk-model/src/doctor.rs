//! Doctor records.

use crate::error::{ModelError, ModelResult};
use caredesk_api::{ApiClient, Session};
use caredesk_query::Page;
use caredesk_types::{DoctorId, FilterParams, Gender, ResourceKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A doctor record as read from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub phone_number: String,
    #[serde(default)]
    pub specialities: Vec<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

/// Fields for creating a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

/// Mutable fields for updating a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorUpdate {
    #[serde(flatten)]
    pub base: DoctorDraft,
    pub active: bool,
}

impl Doctor {
    /// Decodes a raw API record into a typed doctor.
    pub fn from_record(record: serde_json::Value) -> ModelResult<Self> {
        serde_json::from_value(record).map_err(|e| ModelError::validation(ResourceKind::Doctor, e))
    }

    /// Fetches one page of doctors. `page` is 1-based.
    pub async fn get(
        client: &dyn ApiClient,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> ModelResult<Page<Doctor>> {
        let raw = client
            .fetch_collection(ResourceKind::Doctor, &filters, page, page_size, session)
            .await?;
        let items = raw
            .items
            .into_iter()
            .map(Self::from_record)
            .collect::<ModelResult<Vec<_>>>()?;
        debug!(returned = items.len(), total = raw.count, "fetched doctors page");
        Ok(Page::new(items, raw.count))
    }

    /// Fetches a single doctor by id.
    pub async fn get_by_id(
        client: &dyn ApiClient,
        session: &Session,
        id: DoctorId,
    ) -> ModelResult<Doctor> {
        let record = client
            .fetch_by_id(ResourceKind::Doctor, id.as_i64(), session)
            .await?;
        Self::from_record(record)
    }

    /// Creates a doctor, returning the new id.
    pub async fn create(
        client: &dyn ApiClient,
        session: &Session,
        draft: &DoctorDraft,
    ) -> ModelResult<DoctorId> {
        let payload = serde_json::to_value(draft)?;
        let id = client.create(ResourceKind::Doctor, &payload, session).await?;
        Ok(DoctorId::new(id))
    }

    /// Replaces a doctor's mutable fields.
    pub async fn update(
        client: &dyn ApiClient,
        session: &Session,
        id: DoctorId,
        update: &DoctorUpdate,
    ) -> ModelResult<()> {
        let payload = serde_json::to_value(update)?;
        client
            .update(ResourceKind::Doctor, id.as_i64(), &payload, session)
            .await?;
        Ok(())
    }

    /// Deletes a doctor.
    pub async fn delete(client: &dyn ApiClient, session: &Session, id: DoctorId) -> ModelResult<()> {
        client
            .delete(ResourceKind::Doctor, id.as_i64(), session)
            .await?;
        Ok(())
    }
}
