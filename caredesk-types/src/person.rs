//! Shared value types from the clinic domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender as the API records it. Absent on the wire means unspecified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Unspecified => "unspecified",
            Gender::Male => "male",
            Gender::Female => "female",
        };
        f.write_str(s)
    }
}

/// A government-issued personal identifier, e.g. an id-card or passport
/// number together with which document kind it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalId {
    pub id: String,
    /// The document kind (wire field `type`).
    #[serde(rename = "type")]
    pub kind: String,
}

/// An emergency contact on a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    /// Relationship to the patient ("spouse", "parent", ...).
    pub closeness: String,
    pub phone: String,
}
