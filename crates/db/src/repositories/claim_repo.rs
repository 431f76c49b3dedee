//! Repository for the `claims` table.
//!
//! The two unique constraints on `claims` are what keep concurrent
//! reservations from colliding. Inserts go straight to the table and
//! violations are reported back through [`ClaimRepo::classify_violation`].

use bookswap_core::types::{Date, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::models::claim::{BlockedDate, Claim, ClaimWithClaimant};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, claimant_id, request_id, claimed_date, created_at";

/// Unique constraint on `(request_id, claimed_date)`.
pub const UQ_CLAIMS_REQUEST_DATE: &str = "uq_claims_request_date";

/// Unique constraint on `(claimant_id, request_id)`.
pub const UQ_CLAIMS_CLAIMANT_REQUEST: &str = "uq_claims_claimant_request";

/// Foreign key from `claims.request_id` to `blog_requests.id`.
pub const FK_CLAIMS_REQUEST: &str = "claims_request_id_fkey";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Which claim invariant a failed insert ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimViolation {
    /// Another claim already holds this `(request_id, claimed_date)`.
    DateTaken,
    /// The claimant already holds a claim on this request.
    AlreadyClaimed,
    /// The request no longer exists.
    RequestMissing,
}

/// Provides reservation persistence for claims.
pub struct ClaimRepo;

impl ClaimRepo {
    /// Insert a claim. Uniqueness is enforced by the database; use
    /// [`ClaimRepo::classify_violation`] on the error to tell the cases apart.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        claimant_id: DbId,
        request_id: DbId,
        claimed_date: Date,
    ) -> Result<Claim, sqlx::Error> {
        let query = format!(
            "INSERT INTO claims (claimant_id, request_id, claimed_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Claim>(&query)
            .bind(claimant_id)
            .bind(request_id)
            .bind(claimed_date)
            .fetch_one(executor)
            .await
    }

    /// Map a database error from [`ClaimRepo::insert`] onto a claim invariant.
    ///
    /// Returns `None` for errors that are not claim constraint violations.
    pub fn classify_violation(err: &sqlx::Error) -> Option<ClaimViolation> {
        let sqlx::Error::Database(db_err) = err else {
            return None;
        };
        let code = db_err.code();
        match (code.as_deref(), db_err.constraint()) {
            (Some(UNIQUE_VIOLATION), Some(UQ_CLAIMS_REQUEST_DATE)) => Some(ClaimViolation::DateTaken),
            (Some(UNIQUE_VIOLATION), Some(UQ_CLAIMS_CLAIMANT_REQUEST)) => {
                Some(ClaimViolation::AlreadyClaimed)
            }
            (Some(FOREIGN_KEY_VIOLATION), Some(FK_CLAIMS_REQUEST)) => {
                Some(ClaimViolation::RequestMissing)
            }
            _ => None,
        }
    }

    /// Find the claimant's claim on a request, if any.
    pub async fn find_by_claimant_and_request<'e>(
        executor: impl PgExecutor<'e>,
        claimant_id: DbId,
        request_id: DbId,
    ) -> Result<Option<Claim>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM claims WHERE claimant_id = $1 AND request_id = $2");
        sqlx::query_as::<_, Claim>(&query)
            .bind(claimant_id)
            .bind(request_id)
            .fetch_optional(executor)
            .await
    }

    /// Find the claim holding `claimed_date` on a request, if any.
    pub async fn find_by_request_and_date<'e>(
        executor: impl PgExecutor<'e>,
        request_id: DbId,
        claimed_date: Date,
    ) -> Result<Option<Claim>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM claims WHERE request_id = $1 AND claimed_date = $2");
        sqlx::query_as::<_, Claim>(&query)
            .bind(request_id)
            .bind(claimed_date)
            .fetch_optional(executor)
            .await
    }

    /// Delete the claimant's claim on a request. Returns the removed row, if any.
    pub async fn delete_by_claimant_and_request(
        pool: &PgPool,
        claimant_id: DbId,
        request_id: DbId,
    ) -> Result<Option<Claim>, sqlx::Error> {
        let query = format!(
            "DELETE FROM claims WHERE claimant_id = $1 AND request_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Claim>(&query)
            .bind(claimant_id)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete every claim on a request. Returns the number of rows removed.
    pub async fn delete_all_for_request<'e>(
        executor: impl PgExecutor<'e>,
        request_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM claims WHERE request_id = $1")
            .bind(request_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Claimed dates on a single request, ascending.
    pub async fn blocked_dates(pool: &PgPool, request_id: DbId) -> Result<Vec<Date>, sqlx::Error> {
        sqlx::query_scalar::<_, Date>(
            "SELECT claimed_date FROM claims WHERE request_id = $1 ORDER BY claimed_date",
        )
        .bind(request_id)
        .fetch_all(pool)
        .await
    }

    /// Claimed dates for a batch of requests in one round-trip, ordered by
    /// request then date.
    pub async fn blocked_dates_for(
        pool: &PgPool,
        request_ids: &[DbId],
    ) -> Result<Vec<BlockedDate>, sqlx::Error> {
        sqlx::query_as::<_, BlockedDate>(
            "SELECT request_id, claimed_date FROM claims
             WHERE request_id = ANY($1)
             ORDER BY request_id, claimed_date",
        )
        .bind(request_ids)
        .fetch_all(pool)
        .await
    }

    /// Dates on which `claimant_id` has promised a promotion, ascending.
    pub async fn claimed_dates_for(
        pool: &PgPool,
        claimant_id: DbId,
    ) -> Result<Vec<Date>, sqlx::Error> {
        sqlx::query_scalar::<_, Date>(
            "SELECT DISTINCT claimed_date FROM claims WHERE claimant_id = $1 ORDER BY claimed_date",
        )
        .bind(claimant_id)
        .fetch_all(pool)
        .await
    }

    /// Claims on a request with claimant contact details, newest first.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<ClaimWithClaimant>, sqlx::Error> {
        sqlx::query_as::<_, ClaimWithClaimant>(
            "SELECT c.id, c.claimant_id, c.request_id, c.claimed_date, c.created_at,
                    u.username AS claimant_username,
                    p.telegram_nickname AS claimant_telegram_nickname,
                    p.author_page_link AS claimant_author_page_link
             FROM claims c
             JOIN users u ON u.id = c.claimant_id
             LEFT JOIN profiles p ON p.user_id = c.claimant_id
             WHERE c.request_id = $1
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(request_id)
        .fetch_all(pool)
        .await
    }
}
