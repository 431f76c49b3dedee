//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated caller from a JWT Bearer token.
//! - [`json::JsonBody`] -- JSON request body with rejections mapped to `BAD_REQUEST`.

pub mod auth;
pub mod json;
