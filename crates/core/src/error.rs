use crate::types::{Date, DbId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The caller tried to reserve a slot on a request they own.
    #[error("Cannot claim own request {request_id}")]
    SelfClaim { request_id: DbId },

    /// The requested date falls outside `[min_allowed, max_allowed]`.
    #[error("Date {date} is outside the allowed window {min_allowed}..={max_allowed}")]
    OutOfWindow {
        date: Date,
        min_allowed: Date,
        max_allowed: Date,
    },

    /// Another claimant already holds this date on the request.
    #[error("Date {date} is already taken for request {request_id}")]
    DateTaken { request_id: DbId, date: Date },

    /// The caller already holds a reservation on this request.
    #[error("Request {request_id} is already claimed by this user")]
    AlreadyClaimed { request_id: DbId },
}
