//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods that must run inside a
//! caller-owned transaction take a generic [`sqlx::PgExecutor`] instead.

pub mod blog_request_repo;
pub mod claim_repo;
pub mod profile_repo;
pub mod user_repo;

pub use blog_request_repo::BlogRequestRepo;
pub use claim_repo::{ClaimRepo, ClaimViolation};
pub use profile_repo::ProfileRepo;
pub use user_repo::UserRepo;
