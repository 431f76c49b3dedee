//! Slot reservation engine.
//!
//! Decides which dates inside a request's availability window may be
//! claimed, commits claims, and reverses them. The window and ownership rules
//! come from [`bookswap_core::reservation`]; collisions between concurrent
//! claims are arbitrated by the unique indexes on `claims`, never by a
//! check-then-insert across separate statements.

use std::collections::HashMap;

use bookswap_core::error::CoreError;
use bookswap_core::reservation::{check_claim_window, check_not_owner};
use bookswap_core::types::{Date, DbId};
use bookswap_db::models::claim::Claim;
use bookswap_db::repositories::{BlogRequestRepo, ClaimRepo, ClaimViolation};
use sqlx::{PgExecutor, PgPool};

use crate::error::{AppError, AppResult};

/// Entity name used in `NotFound` errors for requests.
pub const REQUEST_ENTITY: &str = "BlogRequest";

/// Reservation operations. Every method takes the caller's identity
/// explicitly.
pub struct ReservationEngine;

impl ReservationEngine {
    /// Every claimed date on a request, ascending.
    ///
    /// Fails with `NotFound` if the request does not exist.
    pub async fn list_blocked_dates(pool: &PgPool, request_id: DbId) -> AppResult<Vec<Date>> {
        if !BlogRequestRepo::exists(pool, request_id).await? {
            return Err(request_not_found(request_id));
        }
        Ok(ClaimRepo::blocked_dates(pool, request_id).await?)
    }

    /// Blocked dates for a batch of requests.
    ///
    /// Every id in `request_ids` is present in the result; requests without
    /// claims map to an empty list. Ids that do not exist are treated the
    /// same as unclaimed requests.
    pub async fn blocked_dates_for(
        pool: &PgPool,
        request_ids: &[DbId],
    ) -> AppResult<HashMap<DbId, Vec<Date>>> {
        let mut blocked: HashMap<DbId, Vec<Date>> =
            request_ids.iter().map(|&id| (id, Vec::new())).collect();
        if request_ids.is_empty() {
            return Ok(blocked);
        }

        for row in ClaimRepo::blocked_dates_for(pool, request_ids).await? {
            blocked.entry(row.request_id).or_default().push(row.claimed_date);
        }
        Ok(blocked)
    }

    /// Reserve `date` on `request_id` for `claimant_id`.
    ///
    /// Rejections, in order: `NotFound`, `SelfClaim`, `OutOfWindow`,
    /// `DateTaken` (another claimant holds `date`), `AlreadyClaimed` (the
    /// claimant already holds a date here; resubmission never moves an
    /// existing reservation).
    pub async fn submit_claim(
        pool: &PgPool,
        claimant_id: DbId,
        request_id: DbId,
        date: Date,
        today: Date,
    ) -> AppResult<Claim> {
        let mut tx = pool.begin().await?;

        let request = BlogRequestRepo::find_by_id_for_share(&mut *tx, request_id)
            .await?
            .ok_or_else(|| request_not_found(request_id))?;

        check_not_owner(claimant_id, request.owner_id, request_id)?;
        check_claim_window(date, today, request.available_from, request.available_to)?;

        let holder = ClaimRepo::find_by_request_and_date(&mut *tx, request_id, date).await?;
        if holder.is_some_and(|claim| claim.claimant_id != claimant_id) {
            return Err(CoreError::DateTaken { request_id, date }.into());
        }
        if ClaimRepo::find_by_claimant_and_request(&mut *tx, claimant_id, request_id)
            .await?
            .is_some()
        {
            return Err(CoreError::AlreadyClaimed { request_id }.into());
        }

        let claim = ClaimRepo::insert(&mut *tx, claimant_id, request_id, date)
            .await
            .map_err(|err| translate_insert_error(err, claimant_id, request_id, date))?;

        tx.commit().await?;

        tracing::info!(
            claim_id = claim.id,
            claimant_id,
            request_id,
            claimed_date = %date,
            "Claim committed",
        );
        Ok(claim)
    }

    /// Remove the claimant's reservation on a request.
    ///
    /// Returns `true` if a claim was removed and `false` if there was nothing
    /// to withdraw. Fails with `NotFound` only when the request itself does
    /// not exist.
    pub async fn withdraw_claim(pool: &PgPool, claimant_id: DbId, request_id: DbId) -> AppResult<bool> {
        if !BlogRequestRepo::exists(pool, request_id).await? {
            return Err(request_not_found(request_id));
        }

        match ClaimRepo::delete_by_claimant_and_request(pool, claimant_id, request_id).await? {
            Some(claim) => {
                tracing::info!(
                    claim_id = claim.id,
                    claimant_id,
                    request_id,
                    claimed_date = %claim.claimed_date,
                    "Claim withdrawn",
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every claim on a request. Runs on the caller's executor so it
    /// can share the request-deletion transaction.
    pub async fn cancel_all<'e>(executor: impl PgExecutor<'e>, request_id: DbId) -> AppResult<u64> {
        let removed = ClaimRepo::delete_all_for_request(executor, request_id).await?;
        if removed > 0 {
            tracing::info!(request_id, removed, "Claims cancelled");
        }
        Ok(removed)
    }
}

/// `NotFound` for a blog request id.
pub fn request_not_found(request_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: REQUEST_ENTITY,
        id: request_id,
    })
}

/// Translate a failed claim insert into the matching domain rejection.
fn translate_insert_error(err: sqlx::Error, claimant_id: DbId, request_id: DbId, date: Date) -> AppError {
    match ClaimRepo::classify_violation(&err) {
        Some(ClaimViolation::DateTaken) => {
            tracing::warn!(claimant_id, request_id, claimed_date = %date, "Lost race for claim date");
            CoreError::DateTaken { request_id, date }.into()
        }
        Some(ClaimViolation::AlreadyClaimed) => {
            tracing::warn!(claimant_id, request_id, "Concurrent duplicate claim rejected");
            CoreError::AlreadyClaimed { request_id }.into()
        }
        Some(ClaimViolation::RequestMissing) => request_not_found(request_id),
        None => AppError::Database(err),
    }
}
