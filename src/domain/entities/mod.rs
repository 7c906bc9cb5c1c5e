//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation input
//! lives in a separate `New*` struct so the stored form always carries the
//! persistence-owned timestamps.

pub mod link;

pub use link::{Link, NewLink};
