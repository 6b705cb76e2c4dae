//! Paginated table driver for CareDesk.
//!
//! This crate is the consumer that ties the core together: one
//! [`TableDriver`] per rendered table composes the query cache, the column
//! preference store and the entity model to drive one paginated list.
//!
//! # Components
//!
//! - **Columns**: caller-supplied [`ColumnDescriptor`]s (accessor, title,
//!   optional renderer) and the [`TableRow`] fallback for plain cells
//! - **Driver**: owns the page/filter cursor, builds the active
//!   [`QueryKey`](caredesk_query::QueryKey), discards late results for
//!   keys the user has already left, and persists column edits
//! - **Context**: a [`ViewContext`] owns one query cache per resource
//!   kind for the lifetime of a view session and invalidates the matching
//!   caches after each *successful* mutation
//! - **Today views**: the summary screen's query functions. They fetch a
//!   server page, filter it to today locally, and preload appointment
//!   relations. Their `count` is the filtered page's length, so
//!   pagination over them is page-local.

mod columns;
mod context;
mod driver;
mod rows;
mod today;

pub use columns::{ColumnDescriptor, RenderFn, TableRow};
pub use context::ViewContext;
pub use driver::{DEFAULT_PAGE_SIZE, TableDriver, TableOptions, TableView};
pub use today::{
    appointment_columns, task_columns, today_appointments_query, today_key, today_tasks_query,
};
