//! Core type definitions for CareDesk.
//!
//! This crate defines the fundamental, view-agnostic types used throughout
//! the client core:
//! - Record identifiers (server-assigned integers, one newtype per kind)
//! - The resource kinds the API exposes
//! - Shared value types from the clinic domain (gender, personal id,
//!   emergency contacts)
//! - Filter parameters for collection queries
//!
//! Anything specific to one resource's full shape (schemes, decoders,
//! relation loading) belongs in `caredesk-model`, not here.

mod filters;
mod ids;
mod kind;
mod person;

pub use filters::FilterParams;
pub use ids::{AppointmentId, DoctorId, PatientId, TaskId};
pub use kind::ResourceKind;
pub use person::{EmergencyContact, Gender, PersonalId};
