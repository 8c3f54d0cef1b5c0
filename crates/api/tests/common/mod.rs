#![allow(dead_code)]

use std::sync::Arc;

use assetman_api::auth::identity::IdentityResolver;
use assetman_api::auth::token::{generate_access_token, TokenConfig};
use assetman_api::auth::users::UserDirectory;
use assetman_api::config::{AuthConfig, ServerConfig, UserEntry};
use assetman_api::router::build_app_router;
use assetman_api::state::AppState;
use assetman_core::roles::Role;
use assetman_core::types::DbId;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key";

/// Build a test `ServerConfig` with safe defaults and no configured users.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        auth: AuthConfig {
            token: TokenConfig {
                secret: TEST_SECRET.to_string(),
                ttl_secs: 3600,
            },
            users: Vec::new(),
            demo_mode: false,
        },
    }
}

/// Build the production router over `pool` with the given config.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let identity = IdentityResolver::from_config(&config.auth).expect("users should hash");
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity: Arc::new(identity),
    };
    build_app_router(state, &config)
}

/// Router with no configured users; tests mint bearer tokens directly with
/// [`token_for`].
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let identity = IdentityResolver::new(UserDirectory::default(), config.auth.token.clone());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        identity: Arc::new(identity),
    };
    build_app_router(state, &config)
}

/// Router whose directory holds `users`.
pub fn build_app_with_users(pool: PgPool, users: Vec<UserEntry>, demo_mode: bool) -> Router {
    let mut config = test_config();
    config.auth.users = users;
    config.auth.demo_mode = demo_mode;
    build_app_with_config(pool, config)
}

/// A signed bearer token for a user named after `role`.
pub fn token_for(role: Role) -> String {
    let config = TokenConfig {
        secret: TEST_SECRET.to_string(),
        ttl_secs: 3600,
    };
    generate_access_token(role.as_str(), role.as_str(), &config).expect("token should sign")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should be handled")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Send a request with an arbitrary `Authorization` header value.
pub async fn send_with_authorization(
    app: Router,
    method: Method,
    uri: &str,
    authorization: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert the status and the `code` field of an error body.
pub async fn assert_error(response: Response, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn status_id(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("SELECT status_id FROM asset_status WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seeded status should exist")
}

pub async fn type_id(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("SELECT type_id FROM asset_types WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("seeded type should exist")
}

pub async fn insert_person(pool: &PgPool, name: &str, email: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO people (display_name, email) VALUES ($1, $2) RETURNING person_id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("person insert should succeed")
}

pub async fn insert_location(pool: &PgPool, name: &str, room: Option<&str>) -> DbId {
    sqlx::query_scalar("INSERT INTO locations (name, room) VALUES ($1, $2) RETURNING location_id")
        .bind(name)
        .bind(room)
        .fetch_one(pool)
        .await
        .expect("location insert should succeed")
}

pub async fn insert_org_unit(pool: &PgPool, name: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO org_units (name) VALUES ($1) RETURNING org_unit_id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("org unit insert should succeed")
}

/// Create an asset through the API as an operator and return its id.
pub async fn create_asset(pool: &PgPool, tag: &str, type_name: &str, status: &str) -> DbId {
    let body = serde_json::json!({
        "asset_tag": tag,
        "type_id": type_id(pool, type_name).await,
        "status_id": status_id(pool, status).await,
    });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/assets",
        body,
        &token_for(Role::Operator),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["asset_id"].as_i64().unwrap()
}

/// Create an assignment through the API as an operator and return the response.
pub async fn create_assignment(pool: &PgPool, body: Value) -> Response {
    post_json_auth(
        build_test_app(pool.clone()),
        "/assignments",
        body,
        &token_for(Role::Operator),
    )
    .await
}
