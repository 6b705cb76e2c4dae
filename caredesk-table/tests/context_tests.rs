mod common;

use caredesk_model::{PatientDraft, TaskDraft};
use caredesk_table::ViewContext;
use caredesk_types::{FilterParams, PatientId, PersonalId, ResourceKind, TaskId};
use chrono::NaiveDate;
use common::{MockApi, patient_record, session, task_record};
use std::sync::Arc;

fn patient_draft() -> PatientDraft {
    PatientDraft {
        name: "Maria Stern".into(),
        personal_id: PersonalId {
            id: "041234567".into(),
            kind: "id_card".into(),
        },
        gender: None,
        phone_number: None,
        languages: None,
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
        emergency_contacts: None,
        referred_by: None,
        special_note: None,
    }
}

fn task_draft() -> TaskDraft {
    TaskDraft {
        patient_id: PatientId::new(1),
        expertise: None,
        title: "ECG".into(),
        description: "routine".into(),
    }
}

// ── Query plumbing ───────────────────────────────────────────────

#[tokio::test]
async fn query_patients_caches_by_key() {
    let api = MockApi::new();
    api.put_page(
        ResourceKind::Patient,
        vec![patient_record(1, "Maria")],
        17,
    );
    let ctx = ViewContext::new(api.clone());

    let first = ctx
        .query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    let second = ctx
        .query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();

    assert_eq!(api.collection_calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.count, 17);
}

#[tokio::test]
async fn different_pages_fetch_independently() {
    let api = MockApi::new();
    let ctx = ViewContext::new(api.clone());

    ctx.query_tasks(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    ctx.query_tasks(&session(), FilterParams::new(), 2, 10)
        .await
        .unwrap();

    assert_eq!(api.collection_calls(), 2);
}

// ── Invalidation after mutations ─────────────────────────────────

#[tokio::test]
async fn successful_mutation_invalidates_its_kind_only() {
    let api = MockApi::new();
    api.put_page(ResourceKind::Patient, vec![patient_record(1, "Maria")], 1);
    api.put_page(
        ResourceKind::Task,
        vec![task_record(20, "Blood panel", "2026-08-06T07:15:00Z")],
        1,
    );
    let ctx = ViewContext::new(api.clone());

    ctx.query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    ctx.query_tasks(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    assert_eq!(api.collection_calls(), 2);

    ctx.create_patient(&session(), &patient_draft()).await.unwrap();

    // patients re-fetch, tasks stay cached
    ctx.query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    ctx.query_tasks(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    assert_eq!(api.collection_calls(), 3);
}

#[tokio::test]
async fn every_cached_page_of_the_kind_is_dropped() {
    let api = MockApi::new();
    let ctx = ViewContext::new(api.clone());

    for page in 1..=3 {
        ctx.query_tasks(&session(), FilterParams::new(), page, 10)
            .await
            .unwrap();
    }
    assert_eq!(api.collection_calls(), 3);

    ctx.update_task(
        &session(),
        TaskId::new(20),
        &caredesk_model::TaskUpdate {
            base: task_draft(),
            complete: true,
        },
    )
    .await
    .unwrap();

    for page in 1..=3 {
        ctx.query_tasks(&session(), FilterParams::new(), page, 10)
            .await
            .unwrap();
    }
    assert_eq!(api.collection_calls(), 6);
}

#[tokio::test]
async fn failed_mutation_leaves_caches_alone() {
    let api = MockApi::new();
    let ctx = ViewContext::new(api.clone());

    ctx.query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    assert_eq!(api.collection_calls(), 1);

    api.fail_mutations();
    ctx.create_patient(&session(), &patient_draft())
        .await
        .unwrap_err();

    // still served from cache
    ctx.query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    assert_eq!(api.collection_calls(), 1);
}

#[tokio::test]
async fn delete_invalidates_like_any_successful_mutation() {
    let api = MockApi::new();
    let ctx = ViewContext::new(api.clone());

    ctx.query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();
    ctx.delete_patient(&session(), PatientId::new(1)).await.unwrap();
    ctx.query_patients(&session(), FilterParams::new(), 1, 10)
        .await
        .unwrap();

    assert_eq!(api.collection_calls(), 2);
}
