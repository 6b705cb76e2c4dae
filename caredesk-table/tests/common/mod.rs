//! Shared test helpers for table tests.

#![allow(dead_code)]

use async_trait::async_trait;
use caredesk_api::{ApiClient, ApiError, ApiResult, RawPage, Session};
use caredesk_types::{FilterParams, ResourceKind};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory API double with canned pages, canned records, call counters
/// and a mutation kill-switch.
#[derive(Default)]
pub struct MockApi {
    pages: Mutex<HashMap<ResourceKind, RawPage>>,
    records: Mutex<HashMap<(ResourceKind, i64), serde_json::Value>>,
    pub collection_calls: AtomicUsize,
    pub by_id_calls: AtomicUsize,
    fail_mutations: AtomicBool,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put_page(&self, kind: ResourceKind, items: Vec<serde_json::Value>, count: u64) {
        self.pages
            .lock()
            .unwrap()
            .insert(kind, RawPage { items, count });
    }

    pub fn put_record(&self, kind: ResourceKind, id: i64, record: serde_json::Value) {
        self.records.lock().unwrap().insert((kind, id), record);
    }

    /// Makes every subsequent create/update/delete answer 500.
    pub fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    pub fn collection_calls(&self) -> usize {
        self.collection_calls.load(Ordering::SeqCst)
    }

    pub fn by_id_calls(&self) -> usize {
        self.by_id_calls.load(Ordering::SeqCst)
    }

    fn mutation_gate(&self) -> ApiResult<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(ApiError::Status {
                status: 500,
                body: "mutation disabled by test".into(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn fetch_collection(
        &self,
        kind: ResourceKind,
        _filters: &FilterParams,
        _page: u32,
        _page_size: u32,
        _session: &Session,
    ) -> ApiResult<RawPage> {
        self.collection_calls.fetch_add(1, Ordering::SeqCst);
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
        self.mutation_gate()?;
        Ok(1)
    }

    async fn update(
        &self,
        _kind: ResourceKind,
        _id: i64,
        _payload: &serde_json::Value,
        _session: &Session,
    ) -> ApiResult<()> {
        self.mutation_gate()
    }

    async fn delete(&self, _kind: ResourceKind, _id: i64, _session: &Session) -> ApiResult<()> {
        self.mutation_gate()
    }
}

pub fn session() -> Session {
    Session::new("test-token")
}

/// Initializes test logging once per binary; respects `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// ── Record builders ──────────────────────────────────────────────

pub fn patient_record(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "personal_id": {"id": "041234567", "type": "id_card"},
        "birth_date": "1990-05-14",
        "age": 36,
        "active": true
    })
}

pub fn doctor_record(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "phone_number": "+97235551234",
        "active": true
    })
}

pub fn task_record(id: i64, title: &str, created_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "patient_id": 1,
        "expertise": null,
        "title": title,
        "description": "",
        "created_at": created_at,
        "complete": false
    })
}

pub fn appointment_record(
    id: i64,
    patient_id: Option<i64>,
    doctor_id: i64,
    start_time: &str,
    end_time: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "patient_id": patient_id,
        "doctor_id": doctor_id,
        "start_time": start_time,
        "end_time": end_time,
        "approved_by_patient": true,
        "visited": false
    })
}
