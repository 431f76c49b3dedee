//! Domain types and pure rules for the book-promotion slot marketplace.
//!
//! This crate has no internal dependencies so the API layer, repositories,
//! and any future tooling can share the same validation logic.

pub mod catalog;
pub mod error;
pub mod matching;
pub mod pagination;
pub mod profile;
pub mod reservation;
pub mod types;
