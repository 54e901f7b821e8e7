//! Patient identity field validation.
//!
//! Runs in the API layer before any storage access so that malformed
//! registrations never reach the database.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a national identifier.
pub const MAX_NATIONAL_ID_LEN: usize = 32;

/// ABO/Rh groups accepted in `blood_type`.
pub const VALID_BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

static NATIONAL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Field view
// ---------------------------------------------------------------------------

/// Borrowed view of the mutable patient fields shared by the create and
/// replace DTOs.
#[derive(Debug, Clone, Copy)]
pub struct PatientFields<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub birth_date: NaiveDate,
    pub gender: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub blood_type: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a national identifier: non-empty ASCII alphanumerics, at most
/// [`MAX_NATIONAL_ID_LEN`] characters.
pub fn validate_national_id(national_id: &str) -> Result<(), CoreError> {
    if national_id.is_empty() {
        return Err(CoreError::Validation(
            "national_id must not be empty".to_string(),
        ));
    }
    if national_id.len() > MAX_NATIONAL_ID_LEN {
        return Err(CoreError::Validation(format!(
            "national_id must be at most {MAX_NATIONAL_ID_LEN} characters"
        )));
    }
    if !NATIONAL_ID_RE.is_match(national_id) {
        return Err(CoreError::Validation(
            "national_id must contain only letters and digits".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a required text field is not blank.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Validate an email address syntactically.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "email '{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validate a blood type against [`VALID_BLOOD_TYPES`].
pub fn validate_blood_type(blood_type: &str) -> Result<(), CoreError> {
    if !VALID_BLOOD_TYPES.contains(&blood_type) {
        return Err(CoreError::Validation(format!(
            "blood_type must be one of {}, got '{blood_type}'",
            VALID_BLOOD_TYPES.join(", ")
        )));
    }
    Ok(())
}

/// Validate that a birth date is not after `today`.
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if birth_date > today {
        return Err(CoreError::Validation(format!(
            "birth_date {birth_date} is in the future"
        )));
    }
    Ok(())
}

/// Validate every mutable patient field. Stops at the first failure.
pub fn validate_patient_fields(
    fields: &PatientFields<'_>,
    today: NaiveDate,
) -> Result<(), CoreError> {
    validate_required_text("name", fields.name)?;
    validate_required_text("surname", fields.surname)?;
    validate_required_text("gender", fields.gender)?;
    validate_required_text("phone", fields.phone)?;
    validate_birth_date(fields.birth_date, today)?;
    if let Some(email) = fields.email {
        validate_email(email)?;
    }
    if let Some(blood_type) = fields.blood_type {
        validate_blood_type(blood_type)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
