//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server or
//! database is needed.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use repairdesk_api::error::AppError;
use repairdesk_core::error::CoreError;
use repairdesk_core::stage::RepairStage;
use repairdesk_db::models::repair_job::CreateRepairJob;
use validator::Validate;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "RepairJob",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "RepairJob with id 42 not found");
}

#[tokio::test]
async fn invalid_stage_returns_400_with_allowed_values() {
    let err: AppError = RepairStage::from_str_db("DIAGNOSTICS").unwrap_err().into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let msg = json["error"].as_str().unwrap();
    assert!(msg.contains("Invalid repair stage 'DIAGNOSTICS'"));
    assert!(msg.contains("pending_assignment"));
}

#[tokio::test]
async fn booking_validation_errors_become_core_validation() {
    let input = CreateRepairJob {
        customer_name: String::new(),
        customer_email: "not-an-email".to_string(),
        device_name: "Phone".to_string(),
        issue_description: "Cracked screen".to_string(),
        delivery_required: false,
    };

    let err: AppError = input.validate().unwrap_err().into();
    assert_matches!(err, AppError::Core(CoreError::Validation(ref msg)) if msg.contains("customer_email"));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_return_500_and_sanitize_message() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
