//! Request catalog validation.
//!
//! Field-level checks for blog requests. Each field is validated on its own
//! so partial updates can report exactly which input was wrong.

use crate::error::CoreError;
use crate::types::Date;

/// Minimum book name length in characters.
pub const MIN_BOOK_NAME_LEN: usize = 1;

/// Maximum book name length in characters (matches the `VARCHAR(255)` column).
pub const MAX_BOOK_NAME_LEN: usize = 255;

/// Validate a book name's length in characters.
pub fn validate_book_name(name: &str) -> Result<(), CoreError> {
    let len = name.chars().count();
    if !(MIN_BOOK_NAME_LEN..=MAX_BOOK_NAME_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "book_name must be between {MIN_BOOK_NAME_LEN} and {MAX_BOOK_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validate that an availability window is ordered.
pub fn validate_window(available_from: Date, available_to: Date) -> Result<(), CoreError> {
    if available_from > available_to {
        return Err(CoreError::Validation(format!(
            "available_from ({available_from}) must not be after available_to ({available_to})"
        )));
    }
    Ok(())
}
