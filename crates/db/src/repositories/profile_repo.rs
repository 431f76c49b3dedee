//! Repository for the `profiles` table (the profile directory).

use bookswap_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::profile::{Profile, PublicProfile, UpdateProfile};

const COLUMNS: &str = "user_id, genre, subscriber_count, author_page_link, \
                       telegram_nickname, created_at, updated_at";

/// Provides profile provisioning, lookup, and owner edits.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Make sure `user_id` has a profile row, creating an empty one if needed.
    ///
    /// Called explicitly by the registration flow inside its transaction.
    /// An existing profile is returned untouched.
    pub async fn ensure(
        conn: &mut PgConnection,
        user_id: DbId,
        telegram_nickname: &str,
    ) -> Result<Profile, sqlx::Error> {
        sqlx::query(
            "INSERT INTO profiles (user_id, telegram_nickname)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(telegram_nickname)
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find the profile for a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Public profile of any user, joined with their username.
    pub async fn find_public(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<PublicProfile>, sqlx::Error> {
        sqlx::query_as::<_, PublicProfile>(
            "SELECT p.user_id, u.username, p.genre, p.subscriber_count,
                    p.author_page_link, p.telegram_nickname
             FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Update a profile. Only supplied fields in `input` are applied.
    ///
    /// The directory fields use a `provided` flag next to the value so an
    /// explicit `Some(None)` clears the column. Returns `None` if the user
    /// has no profile.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                genre = CASE WHEN $2 THEN $3 ELSE genre END,
                subscriber_count = CASE WHEN $4 THEN $5 ELSE subscriber_count END,
                author_page_link = CASE WHEN $6 THEN $7 ELSE author_page_link END,
                telegram_nickname = COALESCE($8, telegram_nickname)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(input.genre.is_some())
            .bind(input.genre.as_ref().and_then(|v| v.as_deref()))
            .bind(input.subscriber_count.is_some())
            .bind(input.subscriber_count.flatten())
            .bind(input.author_page_link.is_some())
            .bind(input.author_page_link.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.telegram_nickname)
            .fetch_optional(pool)
            .await
    }
}
