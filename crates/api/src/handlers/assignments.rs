//! Handlers for asset assignments.

use assetman_core::error::CoreError;
use assetman_core::lifecycle::{
    validate_assignment_create, validate_assignment_update, validate_range,
};
use assetman_core::types::DbId;
use assetman_db::models::assignment::{AssignmentPatch, CreateAssignment};
use assetman_db::repositories::{AssetRepo, AssignmentRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::rbac::{RequireAdmin, RequireWriter};
use crate::response::AssignmentIdResponse;
use crate::state::AppState;

fn assignment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Assignment",
        id,
    })
}

/// POST /assignments
///
/// Record a new assignment. Retired assets cannot be assigned, and at least
/// one of person or location is required.
pub async fn create_assignment(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateAssignment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let mut tx = state.pool.begin().await?;

    let status = AssetRepo::lock_current_status(&mut *tx, input.asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: input.asset_id,
        }))?;

    let checked = status
        .state()
        .and_then(|current| validate_assignment_create(current, &input.as_request()));
    if let Err(err) = checked {
        tracing::warn!(
            asset_id = input.asset_id,
            status = %status.name,
            username = %user.username,
            error = %err,
            "Assignment rejected",
        );
        return Err(err.into());
    }

    let assignment = AssignmentRepo::create(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(
        assignment_id = assignment.assignment_id,
        asset_id = assignment.asset_id,
        person_id = ?assignment.person_id,
        location_id = ?assignment.location_id,
        username = %user.username,
        "Assignment created",
    );

    Ok((
        StatusCode::CREATED,
        Json(AssignmentIdResponse {
            assignment_id: assignment.assignment_id,
        }),
    ))
}

/// PUT /assignments/{id}
///
/// Partial update; setting `assigned_to` closes the assignment.
pub async fn update_assignment(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(patch): ApiJson<AssignmentPatch>,
) -> AppResult<impl IntoResponse> {
    validate_assignment_update(&patch)?;
    patch.validate()?;

    let mut tx = state.pool.begin().await?;

    let existing = AssignmentRepo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| assignment_not_found(id))?;
    if let Some(to) = patch.assigned_to {
        validate_range(existing.assigned_from, to)?;
    }

    let assignment = AssignmentRepo::update(&mut *tx, id, &patch)
        .await?
        .ok_or_else(|| assignment_not_found(id))?;
    tx.commit().await?;

    tracing::info!(
        assignment_id = id,
        asset_id = assignment.asset_id,
        closed = !assignment.is_open(),
        username = %user.username,
        "Assignment updated",
    );

    Ok(Json(AssignmentIdResponse { assignment_id: id }))
}

/// DELETE /assignments/{id}
///
/// Admin only.
pub async fn delete_assignment(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AssignmentRepo::delete(&state.pool, id).await? {
        return Err(assignment_not_found(id));
    }

    tracing::info!(assignment_id = id, username = %user.username, "Assignment deleted");

    Ok(StatusCode::NO_CONTENT)
}
