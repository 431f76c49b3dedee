use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing request-scoped lives here: every handler runs its own transaction
/// against the pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bookswap_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
