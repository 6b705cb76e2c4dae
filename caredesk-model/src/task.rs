//! Task records and their relation loading.

use crate::error::{ModelError, ModelResult};
use crate::patient::Patient;
use caredesk_api::{ApiClient, Session};
use caredesk_query::{Page, QueryError, QueryResult, RelationSlot};
use caredesk_types::{FilterParams, PatientId, ResourceKind, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A task record as read from the API.
///
/// `expertise` is nullable on the wire: a task either needs a specific
/// speciality or explicitly does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub patient_id: PatientId,
    pub expertise: Option<String>,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub complete: bool,
    #[serde(skip)]
    pub patient: RelationSlot<Patient>,
}

/// Fields for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub patient_id: PatientId,
    pub expertise: Option<String>,
    pub title: String,
    pub description: String,
}

/// Mutable fields for updating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(flatten)]
    pub base: TaskDraft,
    pub complete: bool,
}

impl Task {
    /// Decodes a raw API record into a typed task with a fresh, unresolved
    /// patient slot.
    pub fn from_record(record: serde_json::Value) -> ModelResult<Self> {
        serde_json::from_value(record).map_err(|e| ModelError::validation(ResourceKind::Task, e))
    }

    /// Fetches one page of tasks. `page` is 1-based.
    pub async fn get(
        client: &dyn ApiClient,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> ModelResult<Page<Task>> {
        let raw = client
            .fetch_collection(ResourceKind::Task, &filters, page, page_size, session)
            .await?;
        let items = raw
            .items
            .into_iter()
            .map(Self::from_record)
            .collect::<ModelResult<Vec<_>>>()?;
        debug!(returned = items.len(), total = raw.count, "fetched tasks page");
        Ok(Page::new(items, raw.count))
    }

    /// Fetches one page of a patient's tasks.
    pub async fn get_by_patient_id(
        client: &dyn ApiClient,
        session: &Session,
        patient_id: PatientId,
        page: u32,
        page_size: u32,
    ) -> ModelResult<Page<Task>> {
        let filters = FilterParams::new().with("patient_id", patient_id);
        Self::get(client, session, filters, page, page_size).await
    }

    /// Fetches a single task by id.
    pub async fn get_by_id(client: &dyn ApiClient, session: &Session, id: TaskId) -> ModelResult<Task> {
        let record = client
            .fetch_by_id(ResourceKind::Task, id.as_i64(), session)
            .await?;
        Self::from_record(record)
    }

    /// Creates a task, returning the new id.
    pub async fn create(
        client: &dyn ApiClient,
        session: &Session,
        draft: &TaskDraft,
    ) -> ModelResult<TaskId> {
        let payload = serde_json::to_value(draft)?;
        let id = client.create(ResourceKind::Task, &payload, session).await?;
        Ok(TaskId::new(id))
    }

    /// Replaces a task's mutable fields.
    pub async fn update(
        client: &dyn ApiClient,
        session: &Session,
        id: TaskId,
        update: &TaskUpdate,
    ) -> ModelResult<()> {
        let payload = serde_json::to_value(update)?;
        client
            .update(ResourceKind::Task, id.as_i64(), &payload, session)
            .await?;
        Ok(())
    }

    /// Deletes a task.
    pub async fn delete(client: &dyn ApiClient, session: &Session, id: TaskId) -> ModelResult<()> {
        client.delete(ResourceKind::Task, id.as_i64(), session).await?;
        Ok(())
    }

    // ── Relation loading ─────────────────────────────────────────

    /// Loads this task's patient into its relation slot. Concurrent calls
    /// on the same instance share one fetch.
    pub async fn load_patient(
        &self,
        client: Arc<dyn ApiClient>,
        session: Session,
    ) -> QueryResult<Arc<Patient>> {
        let patient_id = self.patient_id;
        self.patient
            .load(move || async move {
                Patient::get_by_id(client.as_ref(), &session, patient_id)
                    .await
                    .map_err(QueryError::from)
            })
            .await
    }

    /// The resolved patient's name, or `None` while the slot is anything
    /// other than resolved.
    pub fn patient_name(&self) -> Option<String> {
        self.patient.get().map(|p| p.name.clone())
    }
}
