//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Successful API payloads are wrapped in
//! [`DataEnvelope`] as `{"data": ...}`.

pub mod health;
pub mod link;

use serde::Serialize;

/// Success payload: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
