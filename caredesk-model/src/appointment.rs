//! Appointment records and their relation loading.

use crate::doctor::Doctor;
use crate::error::{ModelError, ModelResult};
use crate::patient::Patient;
use caredesk_api::{ApiClient, Session};
use caredesk_query::{Page, QueryError, QueryResult, RelationSlot};
use caredesk_types::{AppointmentId, DoctorId, FilterParams, PatientId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// An appointment record as read from the API.
///
/// Carries two relation fields: the doctor (required) and the patient
/// (absent for walk-in slots that have not been claimed). Each has a lazy
/// relation slot so a renderer can resolve the foreign record on demand,
/// exactly once per instance, without blocking the rest of the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: Option<PatientId>,
    pub doctor_id: DoctorId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub approved_by_patient: bool,
    pub visited: bool,
    #[serde(skip)]
    pub doctor: RelationSlot<Doctor>,
    #[serde(skip)]
    pub patient: RelationSlot<Patient>,
}

/// Fields for creating an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
    pub doctor_id: DoctorId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Mutable fields for updating an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(flatten)]
    pub base: AppointmentDraft,
    pub approved_by_patient: bool,
    pub visited: bool,
}

impl Appointment {
    /// Decodes a raw API record into a typed appointment with fresh,
    /// unresolved relation slots.
    pub fn from_record(record: serde_json::Value) -> ModelResult<Self> {
        serde_json::from_value(record)
            .map_err(|e| ModelError::validation(ResourceKind::Appointment, e))
    }

    /// Fetches one page of appointments. `page` is 1-based.
    pub async fn get(
        client: &dyn ApiClient,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> ModelResult<Page<Appointment>> {
        let raw = client
            .fetch_collection(ResourceKind::Appointment, &filters, page, page_size, session)
            .await?;
        let items = raw
            .items
            .into_iter()
            .map(Self::from_record)
            .collect::<ModelResult<Vec<_>>>()?;
        debug!(returned = items.len(), total = raw.count, "fetched appointments page");
        Ok(Page::new(items, raw.count))
    }

    /// Fetches a single appointment by id.
    pub async fn get_by_id(
        client: &dyn ApiClient,
        session: &Session,
        id: AppointmentId,
    ) -> ModelResult<Appointment> {
        let record = client
            .fetch_by_id(ResourceKind::Appointment, id.as_i64(), session)
            .await?;
        Self::from_record(record)
    }

    /// Creates an appointment, returning the new id.
    pub async fn create(
        client: &dyn ApiClient,
        session: &Session,
        draft: &AppointmentDraft,
    ) -> ModelResult<AppointmentId> {
        let payload = serde_json::to_value(draft)?;
        let id = client
            .create(ResourceKind::Appointment, &payload, session)
            .await?;
        Ok(AppointmentId::new(id))
    }

    /// Replaces an appointment's mutable fields.
    pub async fn update(
        client: &dyn ApiClient,
        session: &Session,
        id: AppointmentId,
        update: &AppointmentUpdate,
    ) -> ModelResult<()> {
        let payload = serde_json::to_value(update)?;
        client
            .update(ResourceKind::Appointment, id.as_i64(), &payload, session)
            .await?;
        Ok(())
    }

    /// Deletes an appointment.
    pub async fn delete(
        client: &dyn ApiClient,
        session: &Session,
        id: AppointmentId,
    ) -> ModelResult<()> {
        client
            .delete(ResourceKind::Appointment, id.as_i64(), session)
            .await?;
        Ok(())
    }

    // ── Relation loading ─────────────────────────────────────────

    /// Loads this appointment's doctor into its relation slot.
    ///
    /// Concurrent calls on the same instance share one fetch. A previous
    /// failure is retried by this explicit call; a resolved slot is
    /// returned as-is.
    pub async fn load_doctor(
        &self,
        client: Arc<dyn ApiClient>,
        session: Session,
    ) -> QueryResult<Arc<Doctor>> {
        let doctor_id = self.doctor_id;
        self.doctor
            .load(move || async move {
                Doctor::get_by_id(client.as_ref(), &session, doctor_id)
                    .await
                    .map_err(QueryError::from)
            })
            .await
    }

    /// Loads this appointment's patient into its relation slot.
    ///
    /// Returns `Ok(None)` without fetching when the appointment has no
    /// patient attached.
    pub async fn load_patient(
        &self,
        client: Arc<dyn ApiClient>,
        session: Session,
    ) -> QueryResult<Option<Arc<Patient>>> {
        let Some(patient_id) = self.patient_id else {
            return Ok(None);
        };
        self.patient
            .load(move || async move {
                Patient::get_by_id(client.as_ref(), &session, patient_id)
                    .await
                    .map_err(QueryError::from)
            })
            .await
            .map(Some)
    }

    /// The resolved doctor's name, or `None` while the slot is anything
    /// other than resolved.
    pub fn doctor_name(&self) -> Option<String> {
        self.doctor.get().map(|d| d.name.clone())
    }

    /// The resolved patient's name, or `None` while the slot is anything
    /// other than resolved.
    pub fn patient_name(&self) -> Option<String> {
        self.patient.get().map(|p| p.name.clone())
    }
}
