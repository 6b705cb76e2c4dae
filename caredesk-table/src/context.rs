//! The view context: per-kind query caches and mutation plumbing.

use caredesk_api::{ApiClient, Session};
use caredesk_model::{
    Appointment, AppointmentDraft, AppointmentUpdate, Doctor, DoctorDraft, DoctorUpdate,
    ModelResult, Patient, PatientDraft, PatientUpdate, Task, TaskDraft, TaskUpdate,
};
use caredesk_query::{Page, QueryCache, QueryError, QueryKey, QueryResult};
use caredesk_types::{
    AppointmentId, DoctorId, FilterParams, PatientId, ResourceKind, TaskId,
};
use std::sync::Arc;
use tracing::info;

/// Owns the query caches for one view session.
///
/// One cache per resource kind, created with the context and discarded
/// with it; explicit registries rather than ambient singletons. After a
/// successful mutation of kind T the context drops every cached entry of
/// that kind; a failed mutation invalidates nothing.
pub struct ViewContext {
    client: Arc<dyn ApiClient>,
    pub patients: QueryCache<Patient>,
    pub doctors: QueryCache<Doctor>,
    pub appointments: QueryCache<Appointment>,
    pub tasks: QueryCache<Task>,
}

impl ViewContext {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            patients: QueryCache::new(),
            doctors: QueryCache::new(),
            appointments: QueryCache::new(),
            tasks: QueryCache::new(),
        }
    }

    pub fn client(&self) -> &Arc<dyn ApiClient> {
        &self.client
    }

    /// Drops every cached query of `kind`, across all caches, regardless
    /// of filters or page.
    pub fn invalidate(&self, kind: ResourceKind) {
        let dropped = self.patients.invalidate_kind(kind)
            + self.doctors.invalidate_kind(kind)
            + self.appointments.invalidate_kind(kind)
            + self.tasks.invalidate_kind(kind);
        info!(%kind, dropped, "invalidated caches after mutation");
    }

    // ── Standard collection queries ──────────────────────────────

    /// Resolves one page of patients through the context's cache.
    pub async fn query_patients(
        &self,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> QueryResult<Arc<Page<Patient>>> {
        let key = QueryKey::new(ResourceKind::Patient, filters.clone(), page, page_size);
        let client = Arc::clone(&self.client);
        let session = session.clone();
        self.patients
            .resolve(key, move || async move {
                Patient::get(client.as_ref(), &session, filters, page, page_size)
                    .await
                    .map_err(QueryError::from)
            })
            .await
    }

    /// Resolves one page of doctors through the context's cache.
    pub async fn query_doctors(
        &self,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> QueryResult<Arc<Page<Doctor>>> {
        let key = QueryKey::new(ResourceKind::Doctor, filters.clone(), page, page_size);
        let client = Arc::clone(&self.client);
        let session = session.clone();
        self.doctors
            .resolve(key, move || async move {
                Doctor::get(client.as_ref(), &session, filters, page, page_size)
                    .await
                    .map_err(QueryError::from)
            })
            .await
    }

    /// Resolves one page of appointments through the context's cache.
    pub async fn query_appointments(
        &self,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> QueryResult<Arc<Page<Appointment>>> {
        let key = QueryKey::new(ResourceKind::Appointment, filters.clone(), page, page_size);
        let client = Arc::clone(&self.client);
        let session = session.clone();
        self.appointments
            .resolve(key, move || async move {
                Appointment::get(client.as_ref(), &session, filters, page, page_size)
                    .await
                    .map_err(QueryError::from)
            })
            .await
    }

    /// Resolves one page of tasks through the context's cache.
    pub async fn query_tasks(
        &self,
        session: &Session,
        filters: FilterParams,
        page: u32,
        page_size: u32,
    ) -> QueryResult<Arc<Page<Task>>> {
        let key = QueryKey::new(ResourceKind::Task, filters.clone(), page, page_size);
        let client = Arc::clone(&self.client);
        let session = session.clone();
        self.tasks
            .resolve(key, move || async move {
                Task::get(client.as_ref(), &session, filters, page, page_size)
                    .await
                    .map_err(QueryError::from)
            })
            .await
    }

    // ── Mutations ────────────────────────────────────────────────
    // Invalidation strictly follows success: the `?` returns before any
    // cache is touched when the API call fails.

    pub async fn create_patient(
        &self,
        session: &Session,
        draft: &PatientDraft,
    ) -> ModelResult<PatientId> {
        let id = Patient::create(self.client.as_ref(), session, draft).await?;
        self.invalidate(ResourceKind::Patient);
        Ok(id)
    }

    pub async fn update_patient(
        &self,
        session: &Session,
        id: PatientId,
        update: &PatientUpdate,
    ) -> ModelResult<()> {
        Patient::update(self.client.as_ref(), session, id, update).await?;
        self.invalidate(ResourceKind::Patient);
        Ok(())
    }

    pub async fn delete_patient(&self, session: &Session, id: PatientId) -> ModelResult<()> {
        Patient::delete(self.client.as_ref(), session, id).await?;
        self.invalidate(ResourceKind::Patient);
        Ok(())
    }

    pub async fn create_doctor(
        &self,
        session: &Session,
        draft: &DoctorDraft,
    ) -> ModelResult<DoctorId> {
        let id = Doctor::create(self.client.as_ref(), session, draft).await?;
        self.invalidate(ResourceKind::Doctor);
        Ok(id)
    }

    pub async fn update_doctor(
        &self,
        session: &Session,
        id: DoctorId,
        update: &DoctorUpdate,
    ) -> ModelResult<()> {
        Doctor::update(self.client.as_ref(), session, id, update).await?;
        self.invalidate(ResourceKind::Doctor);
        Ok(())
    }

    pub async fn delete_doctor(&self, session: &Session, id: DoctorId) -> ModelResult<()> {
        Doctor::delete(self.client.as_ref(), session, id).await?;
        self.invalidate(ResourceKind::Doctor);
        Ok(())
    }

    pub async fn create_appointment(
        &self,
        session: &Session,
        draft: &AppointmentDraft,
    ) -> ModelResult<AppointmentId> {
        let id = Appointment::create(self.client.as_ref(), session, draft).await?;
        self.invalidate(ResourceKind::Appointment);
        Ok(id)
    }

    pub async fn update_appointment(
        &self,
        session: &Session,
        id: AppointmentId,
        update: &AppointmentUpdate,
    ) -> ModelResult<()> {
        Appointment::update(self.client.as_ref(), session, id, update).await?;
        self.invalidate(ResourceKind::Appointment);
        Ok(())
    }

    pub async fn delete_appointment(
        &self,
        session: &Session,
        id: AppointmentId,
    ) -> ModelResult<()> {
        Appointment::delete(self.client.as_ref(), session, id).await?;
        self.invalidate(ResourceKind::Appointment);
        Ok(())
    }

    pub async fn create_task(&self, session: &Session, draft: &TaskDraft) -> ModelResult<TaskId> {
        let id = Task::create(self.client.as_ref(), session, draft).await?;
        self.invalidate(ResourceKind::Task);
        Ok(id)
    }

    pub async fn update_task(
        &self,
        session: &Session,
        id: TaskId,
        update: &TaskUpdate,
    ) -> ModelResult<()> {
        Task::update(self.client.as_ref(), session, id, update).await?;
        self.invalidate(ResourceKind::Task);
        Ok(())
    }

    pub async fn delete_task(&self, session: &Session, id: TaskId) -> ModelResult<()> {
        Task::delete(self.client.as_ref(), session, id).await?;
        self.invalidate(ResourceKind::Task);
        Ok(())
    }
}
