//! Route definitions for profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Profile routes, merged at the `/api/v1` root.
///
/// ```text
/// GET /profile              -> get_own
/// PUT /profile              -> update_own
/// GET /profiles/{user_id}   -> get_public
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::get_own).put(profile::update_own))
        .route("/profiles/{user_id}", get(profile::get_public))
}
