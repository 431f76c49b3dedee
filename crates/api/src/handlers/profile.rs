//! Handlers for the caller's profile and public profiles.

use axum::extract::{Path, State};
use axum::Json;
use bookswap_core::error::CoreError;
use bookswap_core::profile::{
    validate_author_page_link, validate_genre, validate_subscriber_count,
    validate_telegram_nickname, AudienceBucket,
};
use bookswap_core::types::DbId;
use bookswap_db::models::profile::{Profile, PublicProfile, UpdateProfile};
use bookswap_db::repositories::ProfileRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::json::JsonBody;
use crate::response::DataResponse;
use crate::state::AppState;

/// A profile with its derived audience bucket.
#[derive(Debug, Serialize)]
pub struct ProfileView<P: Serialize> {
    #[serde(flatten)]
    pub profile: P,
    pub audience: Option<AudienceBucket>,
}

fn profile_not_found(user_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Profile",
        id: user_id,
    })
}

/// GET /api/v1/profile
pub async fn get_own(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<ProfileView<Profile>>>> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| profile_not_found(user.user_id))?;
    Ok(Json(DataResponse {
        data: ProfileView {
            audience: profile.subscriber_count.map(AudienceBucket::for_count),
            profile,
        },
    }))
}

/// PUT /api/v1/profile
pub async fn update_own(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(mut input): JsonBody<UpdateProfile>,
) -> AppResult<Json<DataResponse<ProfileView<Profile>>>> {
    normalize_update(&mut input)?;

    let profile = ProfileRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or_else(|| profile_not_found(user.user_id))?;

    tracing::info!(user_id = user.user_id, "Profile updated");
    Ok(Json(DataResponse {
        data: ProfileView {
            audience: profile.subscriber_count.map(AudienceBucket::for_count),
            profile,
        },
    }))
}

/// GET /api/v1/profiles/{user_id}
pub async fn get_public(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProfileView<PublicProfile>>>> {
    let profile = ProfileRepo::find_public(&state.pool, user_id)
        .await?
        .ok_or_else(|| profile_not_found(user_id))?;
    Ok(Json(DataResponse {
        data: ProfileView {
            audience: profile.subscriber_count.map(AudienceBucket::for_count),
            profile,
        },
    }))
}

/// Trim string fields and validate whatever was supplied.
///
/// A blank genre or author link is treated as a request to clear it.
fn normalize_update(input: &mut UpdateProfile) -> Result<(), CoreError> {
    if let Some(slot) = input.genre.as_mut() {
        normalize_clearable(slot, validate_genre)?;
    }
    if let Some(Some(count)) = input.subscriber_count {
        validate_subscriber_count(count)?;
    }
    if let Some(slot) = input.author_page_link.as_mut() {
        normalize_clearable(slot, validate_author_page_link)?;
    }
    if let Some(nickname) = input.telegram_nickname.as_mut() {
        *nickname = nickname.trim().to_string();
        validate_telegram_nickname(nickname)?;
    }
    Ok(())
}

fn normalize_clearable(
    slot: &mut Option<String>,
    validate: fn(&str) -> Result<(), CoreError>,
) -> Result<(), CoreError> {
    let trimmed = slot.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        *slot = None;
        return Ok(());
    }
    validate(trimmed)?;
    *slot = Some(trimmed.to_string());
    Ok(())
}
