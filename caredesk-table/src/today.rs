//! The summary screen's today views.
//!
//! Both query functions fetch one server page and then filter it to
//! records falling on the local current date. Their `count` is the length
//! of the *filtered* page, not the server's global total, so pagination
//! built on top of them reflects page-local filtering only.

use crate::columns::ColumnDescriptor;
use caredesk_api::{ApiClient, Session};
use caredesk_model::{Appointment, Task};
use caredesk_query::{Page, QueryError, QueryKey, QueryResult};
use caredesk_types::{FilterParams, ResourceKind};
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use tracing::debug;

/// Cache key for a today view. A synthetic filter entry keeps these keys
/// disjoint from the plain collection lists of the same kind.
#[must_use]
pub fn today_key(kind: ResourceKind, page: u32, page_size: u32) -> QueryKey {
    QueryKey::new(
        kind,
        FilterParams::new().with("view", "today"),
        page,
        page_size,
    )
}

fn is_today(timestamp: DateTime<Utc>) -> bool {
    timestamp.with_timezone(&Local).date_naive() == Local::now().date_naive()
}

/// Fetches one page of tasks and keeps only those created today.
pub async fn today_tasks_query(
    client: Arc<dyn ApiClient>,
    session: Session,
    page: u32,
    page_size: u32,
) -> QueryResult<Page<Task>> {
    let fetched = Task::get(client.as_ref(), &session, FilterParams::new(), page, page_size)
        .await
        .map_err(QueryError::from)?;

    let items: Vec<Task> = fetched
        .items
        .into_iter()
        .filter(|task| is_today(task.created_at))
        .collect();
    let count = items.len() as u64;
    debug!(kept = count, "filtered tasks to today");
    Ok(Page::new(items, count))
}

/// Fetches one page of appointments, keeps only today's, and preloads each
/// survivor's doctor and patient relations for display.
///
/// Relation preloading is best-effort: a row whose doctor or patient fails
/// to load keeps its fallback cell text, and the page itself still
/// resolves.
pub async fn today_appointments_query(
    client: Arc<dyn ApiClient>,
    session: Session,
    page: u32,
    page_size: u32,
) -> QueryResult<Page<Appointment>> {
    let fetched = Appointment::get(
        client.as_ref(),
        &session,
        FilterParams::new(),
        page,
        page_size,
    )
    .await
    .map_err(QueryError::from)?;

    let items: Vec<Appointment> = fetched
        .items
        .into_iter()
        .filter(|appointment| is_today(appointment.start_time))
        .collect();

    futures::future::join_all(items.iter().map(|appointment| {
        let client = Arc::clone(&client);
        let session = session.clone();
        async move {
            let _ = futures::join!(
                appointment.load_doctor(Arc::clone(&client), session.clone()),
                appointment.load_patient(client, session),
            );
        }
    }))
    .await;

    let count = items.len() as u64;
    debug!(kept = count, "filtered appointments to today");
    Ok(Page::new(items, count))
}

// ── Default column sets ──────────────────────────────────────────

/// Columns of the today-tasks table.
#[must_use]
pub fn task_columns() -> Vec<ColumnDescriptor<Task>> {
    vec![
        ColumnDescriptor::new("id", "#"),
        ColumnDescriptor::new("title", "Title"),
        ColumnDescriptor::new("expertise", "Expertise"),
        ColumnDescriptor::new("patient_id", "Patient"),
    ]
}

/// Columns of the today-appointments table. Patient and doctor cells show
/// the resolved name when the relation slot is loaded, "Unknown" otherwise.
#[must_use]
pub fn appointment_columns() -> Vec<ColumnDescriptor<Appointment>> {
    vec![
        ColumnDescriptor::new("id", "#"),
        ColumnDescriptor::new("patient_id", "Patient").with_render(|appointment: &Appointment| {
            appointment
                .patient_name()
                .unwrap_or_else(|| "Unknown".to_string())
        }),
        ColumnDescriptor::new("doctor_id", "Doctor").with_render(|appointment: &Appointment| {
            appointment
                .doctor_name()
                .unwrap_or_else(|| "Unknown".to_string())
        }),
        ColumnDescriptor::new("time_range", "Time").with_render(|appointment: &Appointment| {
            format!(
                "{} - {}",
                appointment
                    .start_time
                    .with_timezone(&Local)
                    .format("%H:%M"),
                appointment.end_time.with_timezone(&Local).format("%H:%M"),
            )
        }),
    ]
}
