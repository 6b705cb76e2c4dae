//! Typed clinic entities for CareDesk.
//!
//! Each resource kind has three shapes, mirroring the API contract:
//! - a **draft** (the fields required to create a record),
//! - the **read** shape (adds identity and server-computed fields; fields
//!   declared optional in the draft arrive normalized to a default),
//! - an **update** shape (draft fields plus the mutable status flags).
//!
//! Raw records cross the API boundary as JSON values; the per-kind
//! `from_record` decoders here validate the required-field contract and
//! apply declared defaults, returning a typed entity or a
//! [`ModelError::Validation`]. A required field is never silently guessed.
//!
//! Appointments and tasks also carry relation slots (see
//! `caredesk-query::RelationSlot`) so a row can resolve its doctor or
//! patient by id, on demand, exactly once.

mod appointment;
mod doctor;
mod error;
mod patient;
mod task;

pub use appointment::{Appointment, AppointmentDraft, AppointmentUpdate};
pub use doctor::{Doctor, DoctorDraft, DoctorUpdate};
pub use error::{ModelError, ModelResult};
pub use patient::{Patient, PatientDraft, PatientUpdate};
pub use task::{Task, TaskDraft, TaskUpdate};
