//! Profile directory attributes: genres, audience buckets, field validation.
//!
//! Audience size is stored as a raw subscriber count; buckets are only a
//! filtering vocabulary and are never persisted.

use serde::Serialize;
use validator::ValidateUrl;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

/// Genre codes accepted on profiles and as a matching filter.
pub const GENRES: [&str; 4] = ["genre1", "genre2", "genre3", "genre4"];

/// Validate a genre code.
pub fn validate_genre(genre: &str) -> Result<(), CoreError> {
    if GENRES.contains(&genre) {
        Ok(())
    } else {
        Err(CoreError::InvalidFormat(format!(
            "Unknown genre '{genre}'. Expected one of: {}",
            GENRES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Audience buckets
// ---------------------------------------------------------------------------

/// Subscriber-count bucket used by the matching filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceBucket {
    /// Fewer than 100 subscribers.
    Size1,
    /// 100 to 499 subscribers.
    Size2,
    /// 500 to 999 subscribers.
    Size3,
    /// 1000 subscribers or more.
    Size4,
}

impl AudienceBucket {
    pub const ALL: [AudienceBucket; 4] = [Self::Size1, Self::Size2, Self::Size3, Self::Size4];

    /// Wire code (`size1` .. `size4`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Size1 => "size1",
            Self::Size2 => "size2",
            Self::Size3 => "size3",
            Self::Size4 => "size4",
        }
    }

    /// Parse a wire code.
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|b| b.code() == code)
            .ok_or_else(|| {
                CoreError::InvalidFormat(format!(
                    "Unknown audience bucket '{code}'. Expected one of: size1, size2, size3, size4"
                ))
            })
    }

    /// Half-open subscriber range `[low, high)`. `high` is `None` for the
    /// open-ended top bucket.
    pub fn range(self) -> (i32, Option<i32>) {
        match self {
            Self::Size1 => (0, Some(100)),
            Self::Size2 => (100, Some(500)),
            Self::Size3 => (500, Some(1000)),
            Self::Size4 => (1000, None),
        }
    }

    /// Bucket for a subscriber count. Negative counts never occur in stored
    /// data and fall into the lowest bucket.
    pub fn for_count(count: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.contains(count))
            .unwrap_or(Self::Size1)
    }

    /// Whether `count` lies inside this bucket's range.
    pub fn contains(self, count: i32) -> bool {
        let (low, high) = self.range();
        count >= low && high.map_or(true, |h| count < h)
    }
}

// ---------------------------------------------------------------------------
// Profile field validation
// ---------------------------------------------------------------------------

/// Maximum length of the author page link.
pub const MAX_AUTHOR_PAGE_LINK_LEN: usize = 500;

/// Maximum length of the telegram nickname.
pub const MAX_TELEGRAM_NICKNAME_LEN: usize = 100;

/// Validate a subscriber count.
pub fn validate_subscriber_count(count: i32) -> Result<(), CoreError> {
    if count < 0 {
        return Err(CoreError::Validation(format!(
            "subscriber_count must be >= 0, got {count}"
        )));
    }
    Ok(())
}

/// Validate an author page link: an absolute URL of bounded length.
pub fn validate_author_page_link(link: &str) -> Result<(), CoreError> {
    if link.chars().count() > MAX_AUTHOR_PAGE_LINK_LEN {
        return Err(CoreError::Validation(format!(
            "author_page_link must be at most {MAX_AUTHOR_PAGE_LINK_LEN} characters"
        )));
    }
    if !link.validate_url() {
        return Err(CoreError::InvalidFormat(format!(
            "author_page_link must be a valid URL, got '{link}'"
        )));
    }
    Ok(())
}

/// Validate a telegram nickname. Empty is allowed (the field is optional).
pub fn validate_telegram_nickname(nickname: &str) -> Result<(), CoreError> {
    if nickname.chars().count() > MAX_TELEGRAM_NICKNAME_LEN {
        return Err(CoreError::Validation(format!(
            "telegram_nickname must be at most {MAX_TELEGRAM_NICKNAME_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
