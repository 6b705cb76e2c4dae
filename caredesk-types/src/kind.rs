//! The resource kinds exposed by the clinic API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of resource the API serves. Used as the coarse unit of query-cache
/// invalidation and as the path segment in collection URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Patient,
    Doctor,
    Appointment,
    Task,
}

impl ResourceKind {
    /// The plural path segment for this kind, as the API spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patients",
            ResourceKind::Doctor => "doctors",
            ResourceKind::Appointment => "appointments",
            ResourceKind::Task => "tasks",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
