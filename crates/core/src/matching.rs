//! Matching view filter parsing.

use crate::error::CoreError;
use crate::profile::{validate_genre, AudienceBucket};

/// Parsed, validated filters for the available-requests view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchingFilter {
    /// Owner's genre must equal this code.
    pub genre: Option<String>,
    /// Owner's subscriber count must fall inside this bucket.
    pub audience: Option<AudienceBucket>,
}

impl MatchingFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Empty strings are treated as "no filter" since HTML forms submit an
    /// empty value for the unselected option.
    pub fn from_params(genre: Option<&str>, audience: Option<&str>) -> Result<Self, CoreError> {
        let genre = match genre.map(str::trim).filter(|g| !g.is_empty()) {
            Some(g) => {
                validate_genre(g)?;
                Some(g.to_string())
            }
            None => None,
        };
        let audience = audience
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(AudienceBucket::parse)
            .transpose()?;
        Ok(Self { genre, audience })
    }

    /// Subscriber range bounds for the SQL filter: `(low, high)`.
    pub fn audience_bounds(&self) -> (Option<i32>, Option<i32>) {
        match self.audience {
            Some(bucket) => {
                let (low, high) = bucket.range();
                (Some(low), high)
            }
            None => (None, None),
        }
    }
}
