//! HTTP-level tests for token issue, demo tokens, and role enforcement.

mod common;

use assetman_api::config::parse_user_list;
use assetman_core::roles::Role;
use axum::http::{Method, StatusCode};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{assert_error, body_json, get, get_auth, send_with_authorization};
use sqlx::PgPool;

fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn users() -> Vec<assetman_api::config::UserEntry> {
    parse_user_list("ops:op123:operator;eve:view123:viewer")
}

// ---------------------------------------------------------------------------
// POST /auth/token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn token_exchange_then_me(pool: PgPool) {
    let app = common::build_app_with_users(pool, users(), false);

    let response =
        send_with_authorization(app.clone(), Method::POST, "/auth/token", &basic("ops", "op123"))
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["expires_in"], 3600);
    let token = json["access_token"].as_str().unwrap().to_string();

    let response = get_auth(app, "/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "ops");
    assert_eq!(json["role"], "operator");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_returns_401(pool: PgPool) {
    let app = common::build_app_with_users(pool, users(), false);

    let response =
        send_with_authorization(app, Method::POST, "/auth/token", &basic("ops", "wrong")).await;

    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(json["detail"], "Invalid credentials");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_basic_header_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json(app, "/auth/token", serde_json::json!({})).await;

    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(json["detail"], "Missing credentials");
}

// ---------------------------------------------------------------------------
// GET /auth/demo-token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn demo_token_is_404_when_disabled(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/auth/demo-token").await;

    let json = assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    assert_eq!(json["detail"], "Demo mode disabled");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn demo_token_belongs_to_first_viewer(pool: PgPool) {
    let app = common::build_app_with_users(pool, users(), true);

    let response = get(app.clone(), "/auth/demo-token").await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let json = body_json(get_auth(app, "/auth/me", &token).await).await;
    assert_eq!(json["username"], "eve");
    assert_eq!(json["role"], "viewer");
}

// ---------------------------------------------------------------------------
// Bearer token handling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_bearer_returns_401(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/assets").await;

    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(json["detail"], "Not authenticated");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tampered_token_returns_401(pool: PgPool) {
    let mut token = common::token_for(Role::Admin);
    token.push('x');

    let response = get_auth(common::build_test_app(pool), "/assets", &token).await;

    let json = assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
    assert_eq!(json["detail"], "Invalid or expired token");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn basic_credentials_are_not_accepted_as_bearer(pool: PgPool) {
    let response = send_with_authorization(
        common::build_test_app(pool),
        Method::GET,
        "/assets",
        &basic("ops", "op123"),
    )
    .await;

    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lowercase_bearer_scheme_is_accepted(pool: PgPool) {
    let token = common::token_for(Role::Viewer);
    let response = send_with_authorization(
        common::build_test_app(pool),
        Method::GET,
        "/auth/me",
        &format!("bearer {token}"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "viewer");
}

// ---------------------------------------------------------------------------
// Role gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn viewer_can_list_but_not_create(pool: PgPool) {
    let token = common::token_for(Role::Viewer);

    let response = get_auth(common::build_test_app(pool.clone()), "/assets", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({
        "asset_tag": "LT-VIEW",
        "type_id": common::type_id(&pool, "Laptop").await,
        "status_id": common::status_id(&pool, "in_stock").await,
    });
    let response = common::post_json_auth(common::build_test_app(pool), "/assets", body, &token).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn operator_cannot_delete(pool: PgPool) {
    let asset_id = common::create_asset(&pool, "LT-OPS", "Laptop", "in_stock").await;

    let response = common::delete_auth(
        common::build_test_app(pool),
        &format!("/assets/{asset_id}"),
        &common::token_for(Role::Operator),
    )
    .await;

    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}
