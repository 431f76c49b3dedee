pub mod auth;
pub mod blog_request;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
///
/// /profile                             get, update own profile
/// /profiles/{user_id}                  public profile
///
/// /requests                            create
/// /requests/mine                       created + claimed requests
/// /requests/schedule                   calendar dates
/// /requests/available                  matching view (?genre, audience, limit, offset)
/// /requests/{id}                       owner detail, update, delete
/// /requests/{id}/blocked-dates         claimed dates
/// /requests/{id}/claim                 submit or withdraw claim (POST, DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login).
        .nest("/auth", auth::router())
        // Profile directory.
        .merge(profile::router())
        // Request catalog, matching view, and reservations.
        .nest("/requests", blog_request::router())
}
