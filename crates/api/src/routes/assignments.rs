use axum::routing::{post, put};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Assignment routes mounted at `/assignments`.
///
/// ```text
/// POST   /       -> create_assignment (admin, operator)
/// PUT    /{id}   -> update_assignment (admin, operator)
/// DELETE /{id}   -> delete_assignment (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assignments::create_assignment))
        .route(
            "/{id}",
            put(assignments::update_assignment).delete(assignments::delete_assignment),
        )
}
