//! Matching view: open requests a viewer can claim, filtered by the owner's
//! genre and audience bucket.

use bookswap_core::matching::MatchingFilter;
use bookswap_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use bookswap_core::profile::AudienceBucket;
use bookswap_core::types::{Date, DbId};
use bookswap_db::models::blog_request::AvailableRequest;
use bookswap_db::repositories::BlogRequestRepo;
use serde::Serialize;
use sqlx::PgPool;

use super::reservation::ReservationEngine;
use crate::error::AppResult;

/// One candidate request with the data a claim form needs.
#[derive(Debug, Serialize)]
pub struct AvailableRequestView {
    #[serde(flatten)]
    pub request: AvailableRequest,
    /// Owner's audience bucket, when the owner has a subscriber count.
    pub owner_audience: Option<AudienceBucket>,
    /// Dates already reserved on this request, ascending.
    pub blocked_dates: Vec<Date>,
}

/// Page of candidate requests.
#[derive(Debug, Serialize)]
pub struct AvailableRequests {
    pub items: Vec<AvailableRequestView>,
    /// Date the window minimum was computed against.
    pub today: Date,
    pub limit: i64,
    pub offset: i64,
}

/// Read-only matching operations.
pub struct MatchingView;

impl MatchingView {
    /// Requests `viewer_id` could claim: not their own, not already claimed
    /// by them, matching `filter`, newest start date first.
    pub async fn available(
        pool: &PgPool,
        viewer_id: DbId,
        filter: &MatchingFilter,
        limit: Option<i64>,
        offset: Option<i64>,
        today: Date,
    ) -> AppResult<AvailableRequests> {
        let limit = clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT);
        let offset = clamp_offset(offset);
        let (min_subscribers, max_subscribers) = filter.audience_bounds();

        let rows = BlogRequestRepo::list_available(
            pool,
            viewer_id,
            filter.genre.as_deref(),
            min_subscribers,
            max_subscribers,
            limit,
            offset,
        )
        .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.request.id).collect();
        let mut blocked = ReservationEngine::blocked_dates_for(pool, &ids).await?;

        let items = rows
            .into_iter()
            .map(|request| AvailableRequestView {
                owner_audience: request.owner_subscriber_count.map(AudienceBucket::for_count),
                blocked_dates: blocked.remove(&request.request.id).unwrap_or_default(),
                request,
            })
            .collect();

        Ok(AvailableRequests {
            items,
            today,
            limit,
            offset,
        })
    }
}
