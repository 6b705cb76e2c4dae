use async_trait::async_trait;
use caredesk_api::{ApiClient, ApiError, ApiResult, RawPage, Session};
use caredesk_model::{Appointment, Doctor, Patient, Task};
use caredesk_query::SlotStatus;
use caredesk_types::{DoctorId, FilterParams, PatientId, ResourceKind};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory API double. Serves canned records and counts calls so tests
/// can assert fetch dedup at the model layer.
#[derive(Default)]
struct MockApi {
    records: Mutex<HashMap<(ResourceKind, i64), serde_json::Value>>,
    pages: Mutex<HashMap<ResourceKind, RawPage>>,
    last_collection_call: Mutex<Option<(ResourceKind, FilterParams, u32, u32)>>,
    collection_calls: AtomicUsize,
    by_id_calls: AtomicUsize,
}

impl MockApi {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn put_record(&self, kind: ResourceKind, id: i64, record: serde_json::Value) {
        self.records.lock().unwrap().insert((kind, id), record);
    }

    fn put_page(&self, kind: ResourceKind, page: RawPage) {
        self.pages.lock().unwrap().insert(kind, page);
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn fetch_collection(
        &self,
        kind: ResourceKind,
        filters: &FilterParams,
        page: u32,
        page_size: u32,
        _session: &Session,
    ) -> ApiResult<RawPage> {
        self.collection_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_collection_call.lock().unwrap() =
            Some((kind, filters.clone(), page, page_size));
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or(RawPage {
                items: vec![],
                count: 0,
            }))
    }

    async fn fetch_by_id(
        &self,
        kind: ResourceKind,
        id: i64,
        _session: &Session,
    ) -> ApiResult<serde_json::Value> {
        self.by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .get(&(kind, id))
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                body: "not found".into(),
            })
    }

    async fn create(
        &self,
        _kind: ResourceKind,
        _payload: &serde_json::Value,
        _session: &Session,
    ) -> ApiResult<i64> {
        Ok(1)
    }

    async fn update(
        &self,
        _kind: ResourceKind,
        _id: i64,
        _payload: &serde_json::Value,
        _session: &Session,
    ) -> ApiResult<()> {
        Ok(())
    }

    async fn delete(&self, _kind: ResourceKind, _id: i64, _session: &Session) -> ApiResult<()> {
        Ok(())
    }
}

fn session() -> Session {
    Session::new("test-token")
}

fn doctor_record(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "phone_number": "+97235551234",
        "active": true
    })
}

fn patient_record(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "personal_id": {"id": "041234567", "type": "id_card"},
        "birth_date": "1990-05-14",
        "age": 36,
        "active": true
    })
}

fn appointment_record(id: i64, patient_id: Option<i64>, doctor_id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "patient_id": patient_id,
        "doctor_id": doctor_id,
        "start_time": "2026-08-06T09:00:00Z",
        "end_time": "2026-08-06T09:30:00Z",
        "approved_by_patient": true,
        "visited": false
    })
}

// ── Collection fetch & decode ────────────────────────────────────

#[tokio::test]
async fn get_decodes_every_item_and_keeps_the_server_count() {
    let api = MockApi::new();
    api.put_page(
        ResourceKind::Patient,
        RawPage {
            items: vec![patient_record(1, "Maria"), patient_record(2, "Noa")],
            count: 42,
        },
    );

    let page = Patient::get(api.as_ref(), &session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.count, 42);
    assert_eq!(page.total_pages(10), 5);
}

#[tokio::test]
async fn get_propagates_a_bad_record_as_validation_error() {
    let api = MockApi::new();
    api.put_page(
        ResourceKind::Doctor,
        RawPage {
            items: vec![json!({"id": 1, "active": true})],
            count: 1,
        },
    );

    let err = Doctor::get(api.as_ref(), &session(), FilterParams::new(), 1, 10)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid doctors record"));
}

#[tokio::test]
async fn get_by_patient_id_filters_on_the_patient() {
    let api = MockApi::new();
    Task::get_by_patient_id(api.as_ref(), &session(), PatientId::new(5), 1, 20)
        .await
        .unwrap();

    let (kind, filters, page, page_size) =
        take_last_collection_call(&api).expect("collection was queried");
    assert_eq!(kind, ResourceKind::Task);
    assert_eq!(filters.get("patient_id"), Some("5"));
    assert_eq!(page, 1);
    assert_eq!(page_size, 20);
}

fn take_last_collection_call(api: &MockApi) -> Option<(ResourceKind, FilterParams, u32, u32)> {
    api.last_collection_call.lock().unwrap().take()
}

// ── Relation loading ─────────────────────────────────────────────

#[tokio::test]
async fn load_doctor_resolves_the_slot_once() {
    let api = MockApi::new();
    api.put_record(ResourceKind::Doctor, 3, doctor_record(3, "Dr. Ada Kohn"));

    let appointment = Appointment::from_record(appointment_record(10, Some(1), 3)).unwrap();
    let client: Arc<dyn ApiClient> = api.clone();

    let doctor = appointment
        .load_doctor(Arc::clone(&client), session())
        .await
        .unwrap();
    assert_eq!(doctor.name, "Dr. Ada Kohn");
    assert_eq!(appointment.doctor_name().as_deref(), Some("Dr. Ada Kohn"));

    // second load serves from the slot
    appointment
        .load_doctor(Arc::clone(&client), session())
        .await
        .unwrap();
    assert_eq!(api.by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_doctor_loads_share_one_fetch() {
    let api = MockApi::new();
    api.put_record(ResourceKind::Doctor, 3, doctor_record(3, "Dr. Grace"));

    let appointment = Appointment::from_record(appointment_record(10, None, 3)).unwrap();
    let client: Arc<dyn ApiClient> = api.clone();

    let (a, b, c) = tokio::join!(
        appointment.load_doctor(Arc::clone(&client), session()),
        appointment.load_doctor(Arc::clone(&client), session()),
        appointment.load_doctor(Arc::clone(&client), session()),
    );
    assert_eq!(a.unwrap().name, "Dr. Grace");
    b.unwrap();
    c.unwrap();
    assert_eq!(api.by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn load_patient_without_patient_is_a_no_op() {
    let api = MockApi::new();
    let appointment = Appointment::from_record(appointment_record(11, None, 3)).unwrap();
    let client: Arc<dyn ApiClient> = api.clone();

    let loaded = appointment.load_patient(client, session()).await.unwrap();
    assert!(loaded.is_none());
    assert_eq!(appointment.patient.status(), SlotStatus::Unresolved);
    assert_eq!(api.by_id_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_doctor_load_is_observable_and_retriable() {
    let api = MockApi::new();
    // no doctor record: the mock answers 404

    let appointment = Appointment::from_record(appointment_record(10, None, 9)).unwrap();
    let client: Arc<dyn ApiClient> = api.clone();

    appointment
        .load_doctor(Arc::clone(&client), session())
        .await
        .unwrap_err();
    assert_eq!(appointment.doctor.status(), SlotStatus::Failed);
    assert_eq!(appointment.doctor_name(), None);

    // the record appears; an explicit re-load succeeds
    api.put_record(ResourceKind::Doctor, 9, doctor_record(9, "Dr. Late"));
    let doctor = appointment
        .load_doctor(Arc::clone(&client), session())
        .await
        .unwrap();
    assert_eq!(doctor.name, "Dr. Late");
    assert_eq!(api.by_id_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn task_load_patient_resolves_name() {
    let api = MockApi::new();
    api.put_record(ResourceKind::Patient, 1, patient_record(1, "Maria Stern"));

    let task = Task::from_record(json!({
        "id": 20,
        "patient_id": 1,
        "expertise": null,
        "title": "Blood panel",
        "description": "",
        "created_at": "2026-08-06T07:15:00Z",
        "complete": false
    }))
    .unwrap();

    let client: Arc<dyn ApiClient> = api.clone();
    task.load_patient(client, session()).await.unwrap();
    assert_eq!(task.patient_name().as_deref(), Some("Maria Stern"));
}

// ── Mutations ────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_the_new_typed_id() {
    let api = MockApi::new();
    let draft = caredesk_model::DoctorDraft {
        name: "Dr. New".into(),
        gender: None,
        phone_number: "+97230000000".into(),
        specialities: None,
        special_note: None,
    };
    let id = Doctor::create(api.as_ref(), &session(), &draft).await.unwrap();
    assert_eq!(id, DoctorId::new(1));
}
