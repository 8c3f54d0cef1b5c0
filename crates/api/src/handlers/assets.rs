//! Handlers for assets.
//!
//! Status changes go through the lifecycle engine while the asset row is
//! locked, so the transition is checked against the status it replaces.

use assetman_core::error::CoreError;
use assetman_core::lifecycle::{ensure_non_empty, validate_status_change, LifecycleError};
use assetman_core::listing::AssetListQuery;
use assetman_core::types::DbId;
use assetman_db::models::asset::{AssetPatch, AssetWithAssignment, CreateAsset};
use assetman_db::models::lookup::AssetStatus;
use assetman_db::repositories::{AssetRepo, AssignmentRepo, LookupRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sqlx::PgExecutor;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireWriter};
use crate::response::AssetIdResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Asset", id })
}

/// Load a status row by id, mapping an unknown id to `UnknownStatus`.
async fn find_status<'e, E: PgExecutor<'e>>(executor: E, status_id: DbId) -> AppResult<AssetStatus> {
    LookupRepo::find_status_by_id(executor, status_id)
        .await?
        .ok_or_else(|| LifecycleError::UnknownStatus(format!("id {status_id}")).into())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /assets
///
/// List assets with their open assignment. Multi-value filters may repeat
/// (`status=in_use&status=repair`), so parameters arrive as raw pairs.
pub async fn list_assets(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let query = AssetListQuery::from_pairs(params)?;
    let assets = AssetRepo::list(&state.pool, &query).await?;
    Ok(Json(assets))
}

/// GET /assets/{id}
pub async fn get_asset(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = AssetRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| asset_not_found(id))?;
    let open_assignment = AssignmentRepo::find_open_for_asset(&state.pool, id).await?;

    Ok(Json(AssetWithAssignment {
        detail,
        open_assignment,
    }))
}

/// GET /assets/{id}/assignments
///
/// Assignment history, newest first.
pub async fn list_asset_assignments(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AssetRepo::exists(&state.pool, id).await? {
        return Err(asset_not_found(id));
    }
    let history = AssignmentRepo::list_for_asset(&state.pool, id).await?;
    Ok(Json(history))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /assets
///
/// Any known lifecycle status may be the initial one.
pub async fn create_asset(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateAsset>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let input = input.normalized()?;

    let mut tx = state.pool.begin().await?;

    let status = find_status(&mut *tx, input.status_id).await?;
    status.state()?;

    let asset = AssetRepo::create(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(
        asset_id = asset.asset_id,
        asset_tag = %asset.asset_tag,
        status = %status.name,
        username = %user.username,
        "Asset created",
    );

    Ok((
        StatusCode::CREATED,
        Json(AssetIdResponse {
            asset_id: asset.asset_id,
        }),
    ))
}

/// PUT /assets/{id}
///
/// Partial update. A `status_id` in the patch must be a permitted transition
/// from the asset's current status.
pub async fn update_asset(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(patch): ApiJson<AssetPatch>,
) -> AppResult<impl IntoResponse> {
    ensure_non_empty(&patch)?;
    patch.validate()?;
    let patch = patch.normalized()?;

    let mut tx = state.pool.begin().await?;

    let current = AssetRepo::lock_current_status(&mut *tx, id)
        .await?
        .ok_or_else(|| asset_not_found(id))?;

    if let Some(status_id) = patch.status_id {
        let requested = find_status(&mut *tx, status_id).await?;
        let checked = requested
            .state()
            .and_then(|to| current.state().map(|from| (from, to)))
            .and_then(|(from, to)| validate_status_change(from, to));
        if let Err(err) = checked {
            tracing::warn!(
                asset_id = id,
                from = %current.name,
                to = %requested.name,
                username = %user.username,
                error = %err,
                "Status change rejected",
            );
            return Err(err.into());
        }
    }

    let asset = AssetRepo::update(&mut *tx, id, &patch)
        .await?
        .ok_or_else(|| asset_not_found(id))?;
    tx.commit().await?;

    tracing::info!(
        asset_id = asset.asset_id,
        status_id = asset.status_id,
        username = %user.username,
        "Asset updated",
    );

    Ok(Json(AssetIdResponse {
        asset_id: asset.asset_id,
    }))
}

/// DELETE /assets/{id}
///
/// Hard delete; the asset's assignment history goes with it. Admin only.
pub async fn delete_asset(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AssetRepo::delete(&state.pool, id).await? {
        return Err(asset_not_found(id));
    }

    tracing::info!(asset_id = id, username = %user.username, "Asset deleted");

    Ok(StatusCode::NO_CONTENT)
}
