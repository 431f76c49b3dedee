//! Claim (reserved date) model.

use bookswap_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `claims` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Claim {
    pub id: DbId,
    pub claimant_id: DbId,
    pub request_id: DbId,
    pub claimed_date: Date,
    pub created_at: Timestamp,
}

/// A claim joined with the claimant's contact details, for the owner's
/// request detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClaimWithClaimant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub claim: Claim,
    pub claimant_username: String,
    pub claimant_telegram_nickname: Option<String>,
    pub claimant_author_page_link: Option<String>,
}

/// A `(request_id, claimed_date)` pair used to build blocked-date maps.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct BlockedDate {
    pub request_id: DbId,
    pub claimed_date: Date,
}
