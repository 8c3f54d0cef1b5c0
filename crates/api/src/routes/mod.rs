pub mod assets;
pub mod assignments;
pub mod auth;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the API route tree, served at the root path.
///
/// ```text
/// /auth/token                      bearer token from Basic credentials (public)
/// /auth/demo-token                 demo viewer token (public, demo mode)
/// /auth/me                         caller identity
///
/// /assets                          list, create
/// /assets/{id}                     get, update, delete
/// /assets/{id}/assignments         assignment history
///
/// /assignments                     create
/// /assignments/{id}                update, delete
///
/// /lookups                         types, statuses, org units, locations
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/assets", assets::router())
        .nest("/assignments", assignments::router())
        .route("/lookups", get(handlers::lookups::get_lookups))
}
