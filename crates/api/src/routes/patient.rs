//! Route definitions for the `/patients` resource.
//!
//! Blood tests are nested under `/patients/{national_id}/blood-tests`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{blood_test, patient};
use crate::state::AppState;

/// Routes mounted at `/patients`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// GET    /{national_id}                             -> get_by_national_id
/// PUT    /{national_id}                             -> replace
/// DELETE /{national_id}                             -> delete
///
/// GET    /{national_id}/blood-tests                 -> list_for_patient
/// POST   /{national_id}/blood-tests                 -> create
/// GET    /{national_id}/blood-tests/{test_id}       -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    let blood_test_routes = Router::new()
        .route(
            "/",
            get(blood_test::list_for_patient).post(blood_test::create),
        )
        .route("/{test_id}", get(blood_test::get_by_id));

    Router::new()
        .route("/", get(patient::list).post(patient::create))
        .route(
            "/{national_id}",
            get(patient::get_by_national_id)
                .put(patient::replace)
                .delete(patient::delete),
        )
        .nest("/{national_id}/blood-tests", blood_test_routes)
}
