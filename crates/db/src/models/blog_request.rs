//! Blog request (promotion window) model and DTOs.

use bookswap_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `blog_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogRequest {
    pub id: DbId,
    pub owner_id: DbId,
    pub book_name: String,
    pub start_date: Date,
    pub available_from: Date,
    pub available_to: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for inserting a request.
#[derive(Debug, Clone)]
pub struct CreateBlogRequest {
    pub book_name: String,
    pub start_date: Date,
    pub available_from: Date,
    pub available_to: Date,
}

/// Validated partial update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateBlogRequest {
    pub book_name: Option<String>,
    pub start_date: Option<Date>,
    pub available_from: Option<Date>,
    pub available_to: Option<Date>,
}

impl UpdateBlogRequest {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.book_name.is_none()
            && self.start_date.is_none()
            && self.available_from.is_none()
            && self.available_to.is_none()
    }
}

/// An owned request together with how many slots have been claimed on it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OwnedRequest {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: BlogRequest,
    pub claim_count: i64,
}

/// A request the viewer has claimed, with the date they reserved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClaimedRequest {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: BlogRequest,
    pub owner_username: String,
    pub claimed_date: Date,
}

/// A candidate row from the matching view, before blocked dates are attached.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AvailableRequest {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: BlogRequest,
    pub owner_username: String,
    pub owner_genre: Option<String>,
    pub owner_subscriber_count: Option<i32>,
    pub claimed_by_viewer: bool,
}
