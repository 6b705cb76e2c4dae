//! Patient records.

use crate::error::{ModelError, ModelResult};
use caredesk_api::{ApiClient, Session};
use caredesk_query::Page;
use caredesk_types::{EmergencyContact, FilterParams, Gender, PatientId, PersonalId, ResourceKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A patient record as read from the API.
///
/// `age` and `active` are server-computed. `gender`, `languages` and
/// `emergency_contacts` are optional at creation but always present on
/// read; an absent value decodes to the declared default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub personal_id: PersonalId,
    #[serde(default)]
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub birth_date: NaiveDate,
    pub age: u32,
    pub active: bool,
    #[serde(default)]
    pub emergency_contacts: Vec<EmergencyContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

/// Fields for creating a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub personal_id: PersonalId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    pub birth_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contacts: Option<Vec<EmergencyContact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_note: Option<String>,
}

/// Mutable fields for updating a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(flatten)]
    pub base: PatientDraft,
    pub active: bool,
}

impl Patient {
    /// Decodes a raw API record into a typed patient.
    pub fn from_record(record: serde_json::Value) -> ModelResult<Self> {
        serde_json::from_value(record)
            .map_err(|e| ModelError::validation(ResourceKind::Patient, e))
    }

    /// Fetches one page of patients. `page` is 1-based.
    pub async fn get(
        client: &dyn ApiClient,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> ModelResult<Page<Patient>> {
        let raw = client
            .fetch_collection(ResourceKind::Patient, &filters, page, page_size, session)
            .await?;
        let items = raw
            .items
            .into_iter()
            .map(Self::from_record)
            .collect::<ModelResult<Vec<_>>>()?;
        debug!(returned = items.len(), total = raw.count, "fetched patients page");
        Ok(Page::new(items, raw.count))
    }

    /// Fetches a single patient by id.
    pub async fn get_by_id(
        client: &dyn ApiClient,
        session: &Session,
        id: PatientId,
    ) -> ModelResult<Patient> {
        let record = client
            .fetch_by_id(ResourceKind::Patient, id.as_i64(), session)
            .await?;
        Self::from_record(record)
    }

    /// Creates a patient, returning the new id.
    pub async fn create(
        client: &dyn ApiClient,
        session: &Session,
        draft: &PatientDraft,
    ) -> ModelResult<PatientId> {
        let payload = serde_json::to_value(draft)?;
        let id = client
            .create(ResourceKind::Patient, &payload, session)
            .await?;
        Ok(PatientId::new(id))
    }

    /// Replaces a patient's mutable fields.
    pub async fn update(
        client: &dyn ApiClient,
        session: &Session,
        id: PatientId,
        update: &PatientUpdate,
    ) -> ModelResult<()> {
        let payload = serde_json::to_value(update)?;
        client
            .update(ResourceKind::Patient, id.as_i64(), &payload, session)
            .await?;
        Ok(())
    }

    /// Deletes a patient.
    pub async fn delete(
        client: &dyn ApiClient,
        session: &Session,
        id: PatientId,
    ) -> ModelResult<()> {
        client
            .delete(ResourceKind::Patient, id.as_i64(), session)
            .await?;
        Ok(())
    }
}
