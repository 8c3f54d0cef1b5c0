use std::sync::Arc;

use crate::auth::identity::IdentityResolver;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: assetman_db::DbPool,
    /// Immutable server configuration.
    pub config: Arc<ServerConfig>,
    /// Credential resolution for the auth endpoints and extractors.
    pub identity: Arc<IdentityResolver>,
}
