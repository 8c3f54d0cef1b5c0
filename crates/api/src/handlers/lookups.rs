//! Handler for reference data used to populate client pickers.

use assetman_db::repositories::LookupRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /lookups
///
/// Types, statuses, org units and locations, each ordered by name.
pub async fn get_lookups(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let lookups = LookupRepo::all(&state.pool).await?;
    Ok(Json(lookups))
}
