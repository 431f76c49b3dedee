//! Row structs and DTOs, one module per table.

pub mod blog_request;
pub mod claim;
pub mod profile;
pub mod user;
