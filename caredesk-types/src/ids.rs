//! Identifier types used throughout the CareDesk core.
//!
//! Record identifiers are assigned by the server and are plain integers on
//! the wire. Each kind gets its own newtype so a patient id can never be
//! passed where a doctor id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i64);

impl PatientId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PatientId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a doctor record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(i64);

impl DoctorId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for DoctorId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an appointment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(i64);

impl AppointmentId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AppointmentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
