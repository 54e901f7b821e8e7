//! HTTP-level integration tests for `/patients/{national_id}/blood-tests`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, normal_panel_body, post_json, register_patient};
use medirec_db::repositories::BloodTestRepo;
use sqlx::PgPool;

/// Count every stored blood test, regardless of patient.
async fn total_blood_tests(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blood_tests")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_normal_panel_is_stored_as_normal(pool: PgPool) {
    let patient = register_patient(&pool, "12312312312").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/patients/12312312312/blood-tests",
        normal_panel_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["patient_id"], patient["id"]);
    assert_eq!(json["is_critical"], false);
    assert_eq!(json["analysis_notes"], "normal values");
    assert_eq!(json["hemoglobin"], 14.0);
    assert!(json["test_date"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_abnormal_panel_is_flagged_in_rule_order(pool: PgPool) {
    register_patient(&pool, "45645645645").await;

    let mut panel = normal_panel_body();
    panel["hemoglobin"] = serde_json::json!(10.0);
    panel["wbc"] = serde_json::json!(12.0);
    panel["glucose"] = serde_json::json!(110.0);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/patients/45645645645/blood-tests", panel).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["is_critical"], true);
    assert_eq!(
        json["analysis_notes"],
        "low hemoglobin – possible anemia, high white-cell count – possible infection, \
         high glucose – diabetes risk"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_cannot_set_derived_fields(pool: PgPool) {
    register_patient(&pool, "78978978978").await;

    let mut panel = normal_panel_body();
    panel["is_critical"] = serde_json::json!(true);
    panel["analysis_notes"] = serde_json::json!("forged");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/patients/78978978978/blood-tests", panel).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["is_critical"], false);
    assert_eq!(json["analysis_notes"], "normal values");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_patient_returns_404_and_stores_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/patients/00000000000/blood-tests",
        normal_panel_body(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(total_blood_tests(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incomplete_panel_is_rejected(pool: PgPool) {
    register_patient(&pool, "14714714714").await;

    let mut panel = normal_panel_body();
    panel.as_object_mut().unwrap().remove("creatinine");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/patients/14714714714/blood-tests", panel).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("creatinine"));
    assert_eq!(total_blood_tests(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_analyte_is_rejected(pool: PgPool) {
    register_patient(&pool, "25825825825").await;

    let mut panel = normal_panel_body();
    panel["glucose"] = serde_json::json!("high");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/patients/25825825825/blood-tests", panel).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(total_blood_tests(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Listing and lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_blood_tests_for_patient(pool: PgPool) {
    register_patient(&pool, "36936936936").await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        post_json(
            app,
            "/api/v1/patients/36936936936/blood-tests",
            normal_panel_body(),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/patients/36936936936/blood-tests").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    // Newest first.
    assert!(arr[0]["id"].as_i64().unwrap() > arr[1]["id"].as_i64().unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_for_unknown_patient_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/patients/nobody/blood-tests").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_blood_test_by_id(pool: PgPool) {
    register_patient(&pool, "10101010101").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/patients/10101010101/blood-tests",
            normal_panel_body(),
        )
        .await,
    )
    .await;
    let test_id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/patients/10101010101/blood-tests/{test_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], test_id);
    assert_eq!(json["analysis_notes"], "normal values");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blood_test_under_other_patient_returns_404(pool: PgPool) {
    register_patient(&pool, "20202020202").await;
    register_patient(&pool, "30303030303").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/patients/20202020202/blood-tests",
            normal_panel_body(),
        )
        .await,
    )
    .await;
    let test_id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/patients/30303030303/blood-tests/{test_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_test_id_is_bad_request(pool: PgPool) {
    register_patient(&pool, "50505050505").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/patients/50505050505/blood-tests/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_patient_removes_blood_tests(pool: PgPool) {
    let patient = register_patient(&pool, "40404040404").await;
    let patient_id = patient["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/patients/40404040404/blood-tests",
        normal_panel_body(),
    )
    .await;
    assert_eq!(
        BloodTestRepo::count_for_patient(&pool, patient_id)
            .await
            .unwrap(),
        1
    );

    let app = common::build_test_app(pool.clone());
    let response = delete(app, "/api/v1/patients/40404040404").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        BloodTestRepo::count_for_patient(&pool, patient_id)
            .await
            .unwrap(),
        0
    );
}
