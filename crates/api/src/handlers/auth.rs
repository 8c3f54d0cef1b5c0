//! Handlers for the `/auth` resource (token issue, demo token, caller info).

use assetman_core::error::CoreError;
use assetman_core::roles::Role;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::auth::identity::IssuedToken;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// Response body for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: String,
    pub role: Role,
}

/// POST /auth/token
///
/// Exchange HTTP Basic credentials for a bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<IssuedToken>> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing credentials".into()))?;

    let identity = match state.identity.resolve_basic(header) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(error = %err, "Token request rejected");
            return Err(err.into());
        }
    };

    let issued = state.identity.issue(&identity)?;
    tracing::info!(username = %identity.username, role = %identity.role, "Token issued");

    Ok(Json(issued))
}

/// GET /auth/demo-token
///
/// Public token for the demo account. Served only when demo mode is on.
pub async fn demo_token(State(state): State<AppState>) -> AppResult<Json<IssuedToken>> {
    if !state.config.auth.demo_mode {
        return Err(AppError::NotFound("Demo mode disabled".into()));
    }

    let identity = state
        .identity
        .demo_identity()
        .ok_or_else(|| AppError::NotFound("No demo user configured".into()))?;

    let issued = state.identity.issue(&identity)?;
    tracing::info!(username = %identity.username, "Demo token issued");

    Ok(Json(issued))
}

/// GET /auth/me
pub async fn me(RequireAuth(user): RequireAuth) -> Json<MeResponse> {
    Json(MeResponse {
        username: user.username,
        role: user.role,
    })
}
