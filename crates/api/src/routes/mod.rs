pub mod health;
pub mod patient;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /patients                                        list, register
/// /patients/{national_id}                          get, replace, delete
/// /patients/{national_id}/blood-tests              list, submit panel
/// /patients/{national_id}/blood-tests/{test_id}    get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/patients", patient::router())
}
