//! [`TableRow`] implementations for the clinic entities.
//!
//! These provide the literal cell values; name resolution for relation
//! columns is done by render closures (see `today::appointment_columns`)
//! so an unresolved relation degrades to its id, never to an error.

use crate::columns::TableRow;
use caredesk_model::{Appointment, Doctor, Patient, Task};

impl TableRow for Patient {
    fn cell(&self, accessor: &str) -> String {
        match accessor {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "personal_id" => self.personal_id.id.clone(),
            "gender" => self.gender.to_string(),
            "age" => self.age.to_string(),
            "phone_number" => self.phone_number.clone().unwrap_or_default(),
            "birth_date" => self.birth_date.to_string(),
            "languages" => self.languages.join(", "),
            "active" => self.active.to_string(),
            "referred_by" => self.referred_by.clone().unwrap_or_default(),
            "special_note" => self.special_note.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl TableRow for Doctor {
    fn cell(&self, accessor: &str) -> String {
        match accessor {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "gender" => self.gender.to_string(),
            "phone_number" => self.phone_number.clone(),
            "specialities" => self.specialities.join(", "),
            "active" => self.active.to_string(),
            "special_note" => self.special_note.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl TableRow for Appointment {
    fn cell(&self, accessor: &str) -> String {
        match accessor {
            "id" => self.id.to_string(),
            "patient_id" => self
                .patient_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            "doctor_id" => self.doctor_id.to_string(),
            "start_time" => self.start_time.to_rfc3339(),
            "end_time" => self.end_time.to_rfc3339(),
            "approved_by_patient" => self.approved_by_patient.to_string(),
            "visited" => self.visited.to_string(),
            _ => String::new(),
        }
    }
}

impl TableRow for Task {
    fn cell(&self, accessor: &str) -> String {
        match accessor {
            "id" => self.id.to_string(),
            "patient_id" => self.patient_id.to_string(),
            "title" => self.title.clone(),
            "description" => self.description.clone(),
            "expertise" => self.expertise.clone().unwrap_or_default(),
            "created_at" => self.created_at.to_rfc3339(),
            "complete" => self.complete.to_string(),
            _ => String::new(),
        }
    }
}
