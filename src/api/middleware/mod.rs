//! HTTP middleware for cross-origin access and observability.

pub mod cors;
pub mod tracing;
