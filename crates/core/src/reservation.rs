//! Slot reservation rules.
//!
//! Pure window arithmetic shared by the reservation engine and the request
//! catalog. Persistence and uniqueness enforcement live in the API engine and
//! the database; nothing here touches I/O.

use chrono::Utc;

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Wire format for every calendar date the API accepts or emits.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in UTC. Used as the lower bound for new claims.
pub fn today() -> Date {
    Utc::now().date_naive()
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
///
/// `field` names the offending input in the error message so the client can
/// highlight it.
pub fn parse_date(field: &str, value: &str) -> Result<Date, CoreError> {
    Date::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::InvalidFormat(format!(
            "{field} must be a calendar date in YYYY-MM-DD format, got '{value}'"
        ))
    })
}

/// Earliest date that may be claimed: `max(today, available_from)`.
pub fn min_allowed(today: Date, available_from: Date) -> Date {
    today.max(available_from)
}

/// Check that `date` lies inside `[max(today, available_from), available_to]`.
pub fn check_claim_window(
    date: Date,
    today: Date,
    available_from: Date,
    available_to: Date,
) -> Result<(), CoreError> {
    let min_allowed = min_allowed(today, available_from);
    if date < min_allowed || date > available_to {
        return Err(CoreError::OutOfWindow {
            date,
            min_allowed,
            max_allowed: available_to,
        });
    }
    Ok(())
}

/// Reject a claim on the caller's own request.
pub fn check_not_owner(claimant_id: DbId, owner_id: DbId, request_id: DbId) -> Result<(), CoreError> {
    if claimant_id == owner_id {
        return Err(CoreError::SelfClaim { request_id });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
