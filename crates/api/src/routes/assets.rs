//! Route definitions for assets.

use axum::routing::get;
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /                  -> list_assets
/// POST   /                  -> create_asset (admin, operator)
/// GET    /{id}              -> get_asset
/// PUT    /{id}              -> update_asset (admin, operator)
/// DELETE /{id}              -> delete_asset (admin only)
/// GET    /{id}/assignments  -> list_asset_assignments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/assignments", get(assets::list_asset_assignments))
}
