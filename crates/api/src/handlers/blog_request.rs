//! Handlers for the `/requests` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookswap_core::matching::MatchingFilter;
use bookswap_core::reservation::today;
use bookswap_core::types::{Date, DbId};
use bookswap_db::models::blog_request::BlogRequest;
use serde::{Deserialize, Serialize};

use crate::engine::catalog::{
    CreateRequestInput, MyRequests, RequestCatalog, RequestDetails, Schedule, UpdateRequestInput,
};
use crate::engine::matching::{AvailableRequests, MatchingView};
use crate::engine::reservation::ReservationEngine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /requests/available`.
#[derive(Debug, Default, Deserialize)]
pub struct AvailableParams {
    pub genre: Option<String>,
    pub audience: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body for `GET /requests/{id}/blocked-dates`.
#[derive(Debug, Serialize)]
pub struct BlockedDates {
    pub request_id: DbId,
    pub blocked_dates: Vec<Date>,
}

/// POST /api/v1/requests
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(input): JsonBody<CreateRequestInput>,
) -> AppResult<(StatusCode, Json<DataResponse<BlogRequest>>)> {
    let request = RequestCatalog::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RequestDetails>>> {
    let details = RequestCatalog::details(&state.pool, user.user_id, id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// PATCH /api/v1/requests/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    JsonBody(input): JsonBody<UpdateRequestInput>,
) -> AppResult<Json<DataResponse<BlogRequest>>> {
    let request = RequestCatalog::update(&state.pool, user.user_id, id, &input).await?;
    Ok(Json(DataResponse { data: request }))
}

/// DELETE /api/v1/requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    RequestCatalog::delete(&state.pool, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/requests/mine
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<MyRequests>>> {
    let mine = RequestCatalog::mine(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: mine }))
}

/// GET /api/v1/requests/schedule
pub async fn schedule(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let schedule = RequestCatalog::schedule(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: schedule }))
}

/// GET /api/v1/requests/available?genre=&audience=&limit=&offset=
pub async fn available(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<AvailableParams>,
) -> AppResult<Json<DataResponse<AvailableRequests>>> {
    let filter = MatchingFilter::from_params(params.genre.as_deref(), params.audience.as_deref())?;
    let page = MatchingView::available(
        &state.pool,
        user.user_id,
        &filter,
        params.limit,
        params.offset,
        today(),
    )
    .await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/requests/{id}/blocked-dates
pub async fn blocked_dates(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BlockedDates>>> {
    let blocked_dates = ReservationEngine::list_blocked_dates(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: BlockedDates {
            request_id: id,
            blocked_dates,
        },
    }))
}
