//! Repository for the `blood_tests` table.

use medirec_core::types::DbId;
use sqlx::PgPool;

use crate::models::blood_test::{BloodTest, NewBloodTest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, patient_id, hemoglobin, hematocrit, wbc, rbc, platelets, glucose, \
                       urea, creatinine, alt, ast, test_date, is_critical, analysis_notes";

/// Provides persistence for evaluated blood tests.
pub struct BloodTestRepo;

impl BloodTestRepo {
    /// Insert an evaluated blood test. `test_date` defaults to `NOW()`.
    pub async fn create(pool: &PgPool, input: &NewBloodTest) -> Result<BloodTest, sqlx::Error> {
        let query = format!(
            "INSERT INTO blood_tests
                (patient_id, hemoglobin, hematocrit, wbc, rbc, platelets, glucose,
                 urea, creatinine, alt, ast, is_critical, analysis_notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        let panel = input.panel();
        let evaluation = input.evaluation();
        sqlx::query_as::<_, BloodTest>(&query)
            .bind(input.patient_id())
            .bind(panel.hemoglobin)
            .bind(panel.hematocrit)
            .bind(panel.wbc)
            .bind(panel.rbc)
            .bind(panel.platelets)
            .bind(panel.glucose)
            .bind(panel.urea)
            .bind(panel.creatinine)
            .bind(panel.alt)
            .bind(panel.ast)
            .bind(evaluation.is_critical)
            .bind(evaluation.analysis_notes())
            .fetch_one(pool)
            .await
    }

    /// List a patient's blood tests, newest first.
    pub async fn list_for_patient(
        pool: &PgPool,
        patient_id: DbId,
    ) -> Result<Vec<BloodTest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blood_tests
             WHERE patient_id = $1
             ORDER BY test_date DESC, id DESC"
        );
        sqlx::query_as::<_, BloodTest>(&query)
            .bind(patient_id)
            .fetch_all(pool)
            .await
    }

    /// Find one blood test, scoped to its owning patient.
    ///
    /// Returns `None` when the test exists but belongs to someone else.
    pub async fn find_for_patient(
        pool: &PgPool,
        patient_id: DbId,
        id: DbId,
    ) -> Result<Option<BloodTest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blood_tests WHERE id = $1 AND patient_id = $2");
        sqlx::query_as::<_, BloodTest>(&query)
            .bind(id)
            .bind(patient_id)
            .fetch_optional(pool)
            .await
    }

    /// Count a patient's blood tests.
    pub async fn count_for_patient(pool: &PgPool, patient_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM blood_tests WHERE patient_id = $1")
                .bind(patient_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
