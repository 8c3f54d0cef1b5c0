//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use assetman_api::error::AppError;
use assetman_core::error::CoreError;
use assetman_core::lifecycle::{AssetState, LifecycleError};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

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
        entity: "Asset",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["detail"], "Asset with id 42 not found");
}

#[tokio::test]
async fn invalid_transition_returns_400_with_reason() {
    let err: AppError = LifecycleError::InvalidTransition {
        from: AssetState::Retired,
        to: AssetState::InUse,
    }
    .into();

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_TRANSITION");
    assert_eq!(
        json["detail"],
        "Invalid status transition from 'retired' to 'in_use'"
    );
}

#[tokio::test]
async fn every_lifecycle_rejection_is_a_400() {
    let cases = [
        (LifecycleError::UnknownStatus("id 99".into()), "UNKNOWN_STATUS"),
        (LifecycleError::AssetRetired, "ASSET_RETIRED"),
        (LifecycleError::MissingTarget, "MISSING_TARGET"),
        (LifecycleError::InvalidRange, "INVALID_RANGE"),
        (LifecycleError::EmptyUpdate, "EMPTY_UPDATE"),
    ];

    for (err, code) in cases {
        let (status, json) = error_to_response(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(json["code"], code);
        assert!(json["detail"].is_string());
    }
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("currency must be 3 letters".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["detail"], "currency must be 3 letters");
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("Not authenticated".into())))
            .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["detail"], "Not authenticated");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("nope".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn route_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::NotFound("Demo mode disabled".into())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["detail"], "Demo mode disabled");
}

#[tokio::test]
async fn internal_error_hides_message() {
    let err = AppError::Core(CoreError::Internal("Failed to sign token: bad key".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["detail"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_return_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["detail"], "An internal error occurred");
}
