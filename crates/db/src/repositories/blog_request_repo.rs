//! Repository for the `blog_requests` table (the request catalog).

use bookswap_core::types::{Date, DbId};
use sqlx::{PgExecutor, PgPool};

use crate::models::blog_request::{
    AvailableRequest, BlogRequest, ClaimedRequest, CreateBlogRequest, OwnedRequest,
    UpdateBlogRequest,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, book_name, start_date, available_from, available_to, \
                       created_at, updated_at";

/// Same columns qualified with the `r` alias, for joins.
const R_COLUMNS: &str = "r.id, r.owner_id, r.book_name, r.start_date, r.available_from, \
                         r.available_to, r.created_at, r.updated_at";

/// Provides CRUD and listing queries for blog requests.
pub struct BlogRequestRepo;

impl BlogRequestRepo {
    /// Insert a new request owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateBlogRequest,
    ) -> Result<BlogRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_requests (owner_id, book_name, start_date, available_from, available_to)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogRequest>(&query)
            .bind(owner_id)
            .bind(&input.book_name)
            .bind(input.start_date)
            .bind(input.available_from)
            .bind(input.available_to)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<BlogRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_requests WHERE id = $1");
        sqlx::query_as::<_, BlogRequest>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a request and hold a shared row lock until the transaction ends.
    ///
    /// Concurrent claim submissions can all hold the shared lock, but an owner
    /// update or delete waits, so window bounds stay stable while a claim is
    /// validated and inserted.
    pub async fn find_by_id_for_share<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<BlogRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_requests WHERE id = $1 FOR SHARE");
        sqlx::query_as::<_, BlogRequest>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a request and hold an exclusive row lock until the transaction ends.
    pub async fn find_by_id_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<BlogRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, BlogRequest>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Check whether a request exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM blog_requests WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Update a request. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateBlogRequest,
    ) -> Result<Option<BlogRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_requests SET
                book_name = COALESCE($2, book_name),
                start_date = COALESCE($3, start_date),
                available_from = COALESCE($4, available_from),
                available_to = COALESCE($5, available_to)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogRequest>(&query)
            .bind(id)
            .bind(&input.book_name)
            .bind(input.start_date)
            .bind(input.available_from)
            .bind(input.available_to)
            .fetch_optional(executor)
            .await
    }

    /// Permanently delete a request. Returns `true` if a row was removed.
    ///
    /// Claims on the request are removed by the `ON DELETE CASCADE` foreign key.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_requests WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Requests owned by `owner_id` with their claim counts, newest start date first.
    pub async fn list_owned(pool: &PgPool, owner_id: DbId) -> Result<Vec<OwnedRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS},
                    (SELECT COUNT(*) FROM claims c WHERE c.request_id = r.id) AS claim_count
             FROM blog_requests r
             WHERE r.owner_id = $1
             ORDER BY r.start_date DESC, r.id DESC"
        );
        sqlx::query_as::<_, OwnedRequest>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Requests owned by others that `claimant_id` has claimed, newest start date first.
    pub async fn list_claimed_by(
        pool: &PgPool,
        claimant_id: DbId,
    ) -> Result<Vec<ClaimedRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS}, u.username AS owner_username, c.claimed_date
             FROM claims c
             JOIN blog_requests r ON r.id = c.request_id
             JOIN users u ON u.id = r.owner_id
             WHERE c.claimant_id = $1 AND r.owner_id <> $1
             ORDER BY r.start_date DESC, r.id DESC"
        );
        sqlx::query_as::<_, ClaimedRequest>(&query)
            .bind(claimant_id)
            .fetch_all(pool)
            .await
    }

    /// Candidate requests for `viewer_id`.
    ///
    /// Excludes the viewer's own requests and requests the viewer already
    /// claimed. `genre` filters on the owner's profile genre; `min_subscribers`
    /// (inclusive) and `max_subscribers` (exclusive) filter on the owner's
    /// subscriber count. Owners without a profile value never match a filter
    /// on that value.
    #[allow(clippy::too_many_arguments)]
    pub async fn list_available(
        pool: &PgPool,
        viewer_id: DbId,
        genre: Option<&str>,
        min_subscribers: Option<i32>,
        max_subscribers: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AvailableRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS},
                    u.username AS owner_username,
                    p.genre AS owner_genre,
                    p.subscriber_count AS owner_subscriber_count,
                    EXISTS (
                        SELECT 1 FROM claims c
                        WHERE c.request_id = r.id AND c.claimant_id = $1
                    ) AS claimed_by_viewer
             FROM blog_requests r
             JOIN users u ON u.id = r.owner_id
             LEFT JOIN profiles p ON p.user_id = r.owner_id
             WHERE r.owner_id <> $1
               AND NOT EXISTS (
                   SELECT 1 FROM claims c
                   WHERE c.request_id = r.id AND c.claimant_id = $1
               )
               AND ($2::VARCHAR IS NULL OR p.genre = $2)
               AND ($3::INTEGER IS NULL OR p.subscriber_count >= $3)
               AND ($4::INTEGER IS NULL OR p.subscriber_count < $4)
             ORDER BY r.start_date DESC, r.id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, AvailableRequest>(&query)
            .bind(viewer_id)
            .bind(genre)
            .bind(min_subscribers)
            .bind(max_subscribers)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Start dates of every request owned by `owner_id`, ascending.
    pub async fn start_dates_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Date>, sqlx::Error> {
        sqlx::query_scalar::<_, Date>(
            "SELECT DISTINCT start_date FROM blog_requests WHERE owner_id = $1 ORDER BY start_date",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }
}
