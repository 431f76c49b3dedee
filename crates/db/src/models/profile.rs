//! Profile directory model and DTOs.

use bookswap_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub genre: Option<String>,
    pub subscriber_count: Option<i32>,
    pub author_page_link: Option<String>,
    pub telegram_nickname: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of another author's profile, joined with their username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicProfile {
    pub user_id: DbId,
    pub username: String,
    pub genre: Option<String>,
    pub subscriber_count: Option<i32>,
    pub author_page_link: Option<String>,
    pub telegram_nickname: String,
}

/// DTO for updating a profile. Absent fields are kept.
///
/// The optional directory fields use `Option<Option<T>>`: the outer `None`
/// means "not supplied", `Some(None)` (JSON `null`) clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    #[serde(default, deserialize_with = "nullable")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub subscriber_count: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub author_page_link: Option<Option<String>>,
    pub telegram_nickname: Option<String>,
}

/// Deserialize a present field, keeping an explicit `null` as `Some(None)`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
