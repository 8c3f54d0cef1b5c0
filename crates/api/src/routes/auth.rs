//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /token       -> issue_token (HTTP Basic)
/// GET  /demo-token  -> demo_token (public, demo mode only)
/// GET  /me          -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token", post(auth::issue_token))
        .route("/demo-token", get(auth::demo_token))
        .route("/me", get(auth::me))
}
