//! Marketplace engine.
//!
//! Holds the business operations behind the HTTP handlers: the slot
//! reservation engine, the request catalog, and the matching view. Every
//! operation takes the caller's user id as an explicit argument.

pub mod catalog;
pub mod matching;
pub mod reservation;
