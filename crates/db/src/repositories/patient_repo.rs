//! Repository for the `patients` table.

use medirec_core::types::DbId;
use sqlx::PgPool;

use crate::models::patient::{CreatePatient, Patient, UpdatePatient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, national_id, name, surname, birth_date, gender, phone, \
                       email, address, blood_type, created_at, updated_at";

/// Provides CRUD operations for patients.
///
/// External callers address patients by `national_id`; the surrogate `id`
/// is only used to link blood tests.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a new patient, returning the created row.
    ///
    /// A duplicate `national_id` fails with a unique violation on
    /// `uq_patients_national_id`.
    pub async fn create(pool: &PgPool, input: &CreatePatient) -> Result<Patient, sqlx::Error> {
        let query = format!(
            "INSERT INTO patients
                (national_id, name, surname, birth_date, gender, phone, email, address, blood_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(&input.national_id)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(input.birth_date)
            .bind(&input.gender)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.blood_type)
            .fetch_one(pool)
            .await
    }

    /// Find a patient by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a patient by national identifier.
    pub async fn find_by_national_id(
        pool: &PgPool,
        national_id: &str,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE national_id = $1");
        sqlx::query_as::<_, Patient>(&query)
            .bind(national_id)
            .fetch_optional(pool)
            .await
    }

    /// List patients in registration order.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Patient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM patients ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Patient>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Replace every mutable field of a patient.
    ///
    /// Returns `None` if no patient has the given `national_id`.
    pub async fn replace(
        pool: &PgPool,
        national_id: &str,
        input: &UpdatePatient,
    ) -> Result<Option<Patient>, sqlx::Error> {
        let query = format!(
            "UPDATE patients SET
                name = $2,
                surname = $3,
                birth_date = $4,
                gender = $5,
                phone = $6,
                email = $7,
                address = $8,
                blood_type = $9,
                updated_at = NOW()
             WHERE national_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(national_id)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(input.birth_date)
            .bind(&input.gender)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.blood_type)
            .fetch_optional(pool)
            .await
    }

    /// Delete a patient and, via `ON DELETE CASCADE`, their blood tests.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, national_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM patients WHERE national_id = $1")
            .bind(national_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
