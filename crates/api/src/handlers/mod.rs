//! Request handlers.
//!
//! Handlers extract the caller with [`crate::middleware::auth::AuthUser`],
//! hand off to the engine or a repository, and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod blog_request;
pub mod claim;
pub mod profile;
