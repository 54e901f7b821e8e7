//! Patient entity model and DTOs.

use chrono::NaiveDate;
use medirec_core::patient::PatientFields;
use medirec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A patient row from the `patients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Patient {
    pub id: DbId,
    pub national_id: String,
    pub name: String,
    pub surname: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new patient.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatient {
    pub national_id: String,
    pub name: String,
    pub surname: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
}

impl CreatePatient {
    pub fn fields(&self) -> PatientFields<'_> {
        PatientFields {
            name: &self.name,
            surname: &self.surname,
            birth_date: self.birth_date,
            gender: &self.gender,
            phone: &self.phone,
            email: self.email.as_deref(),
            blood_type: self.blood_type.as_deref(),
        }
    }
}

/// DTO for replacing a patient record.
///
/// The national identifier is immutable and therefore absent. Optional
/// fields left out of the body are cleared.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePatient {
    pub name: String,
    pub surname: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_type: Option<String>,
}

impl UpdatePatient {
    pub fn fields(&self) -> PatientFields<'_> {
        PatientFields {
            name: &self.name,
            surname: &self.surname,
            birth_date: self.birth_date,
            gender: &self.gender,
            phone: &self.phone,
            email: self.email.as_deref(),
            blood_type: self.blood_type.as_deref(),
        }
    }
}
