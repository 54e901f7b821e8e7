//! Handlers for the `/patients` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use medirec_core::error::CoreError;
use medirec_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use medirec_core::patient::{validate_national_id, validate_patient_fields};
use medirec_db::models::patient::{CreatePatient, Patient, UpdatePatient};
use medirec_db::repositories::PatientRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::PaginationParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up a patient by national identifier, mapping a miss to 404.
pub(crate) async fn ensure_patient_exists(
    pool: &sqlx::PgPool,
    national_id: &str,
) -> AppResult<Patient> {
    PatientRepo::find_by_national_id(pool, national_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Patient", national_id)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/patients
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePatient>,
) -> AppResult<(StatusCode, Json<Patient>)> {
    validate_national_id(&input.national_id)?;
    validate_patient_fields(&input.fields(), Utc::now().date_naive())?;

    if PatientRepo::find_by_national_id(&state.pool, &input.national_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A patient with national_id {} is already registered",
            input.national_id
        ))));
    }

    let patient = PatientRepo::create(&state.pool, &input).await?;

    tracing::info!(
        patient_id = patient.id,
        national_id = %patient.national_id,
        "Patient registered"
    );

    Ok((StatusCode::CREATED, Json(patient)))
}

/// GET /api/v1/patients?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Vec<Patient>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let patients = PatientRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(patients))
}

/// GET /api/v1/patients/{national_id}
pub async fn get_by_national_id(
    State(state): State<AppState>,
    AppPath(national_id): AppPath<String>,
) -> AppResult<Json<Patient>> {
    let patient = ensure_patient_exists(&state.pool, &national_id).await?;
    Ok(Json(patient))
}

/// PUT /api/v1/patients/{national_id}
///
/// Replaces every mutable field; the national identifier never changes.
pub async fn replace(
    State(state): State<AppState>,
    AppPath(national_id): AppPath<String>,
    AppJson(input): AppJson<UpdatePatient>,
) -> AppResult<Json<Patient>> {
    validate_patient_fields(&input.fields(), Utc::now().date_naive())?;

    let patient = PatientRepo::replace(&state.pool, &national_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Patient", &national_id)))?;

    tracing::info!(patient_id = patient.id, "Patient record replaced");

    Ok(Json(patient))
}

/// DELETE /api/v1/patients/{national_id}
///
/// Blood tests belonging to the patient are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(national_id): AppPath<String>,
) -> AppResult<StatusCode> {
    let deleted = PatientRepo::delete(&state.pool, &national_id).await?;
    if deleted {
        tracing::info!(national_id = %national_id, "Patient deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Patient", national_id)))
    }
}
