//! Route definitions for the `/requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{blog_request, claim};
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// POST   /                    -> create
/// GET    /mine                -> mine
/// GET    /schedule            -> schedule
/// GET    /available           -> available
/// GET    /{id}                -> get_by_id
/// PATCH  /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /{id}/blocked-dates  -> blocked_dates
/// POST   /{id}/claim          -> claim::submit
/// DELETE /{id}/claim          -> claim::withdraw
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(blog_request::create))
        .route("/mine", get(blog_request::mine))
        .route("/schedule", get(blog_request::schedule))
        .route("/available", get(blog_request::available))
        .route(
            "/{id}",
            get(blog_request::get_by_id)
                .patch(blog_request::update)
                .delete(blog_request::delete),
        )
        .route("/{id}/blocked-dates", get(blog_request::blocked_dates))
        .route("/{id}/claim", post(claim::submit).delete(claim::withdraw))
}
