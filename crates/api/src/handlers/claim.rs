//! Handlers for `/requests/{id}/claim`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookswap_core::reservation::{parse_date, today};
use bookswap_core::types::DbId;
use serde::Deserialize;

use crate::engine::reservation::ReservationEngine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /requests/{id}/claim`.
#[derive(Debug, Default, Deserialize)]
pub struct ClaimRequest {
    /// `YYYY-MM-DD`. Null or empty withdraws the caller's claim.
    #[serde(default)]
    pub claimed_date: Option<String>,
}

/// POST /api/v1/requests/{id}/claim
///
/// Reserve a date (201 with the claim) or, with an empty date, withdraw the
/// caller's reservation (204).
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(request_id): Path<DbId>,
    JsonBody(input): JsonBody<ClaimRequest>,
) -> AppResult<Response> {
    let raw = input.claimed_date.as_deref().map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        ReservationEngine::withdraw_claim(&state.pool, user.user_id, request_id).await?;
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let date = parse_date("claimed_date", raw)?;
    let claim =
        ReservationEngine::submit_claim(&state.pool, user.user_id, request_id, date, today())
            .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: claim })).into_response())
}

/// DELETE /api/v1/requests/{id}/claim
pub async fn withdraw(
    State(state): State<AppState>,
    user: AuthUser,
    Path(request_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ReservationEngine::withdraw_claim(&state.pool, user.user_id, request_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
