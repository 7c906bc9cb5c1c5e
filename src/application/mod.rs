//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the domain codec, and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link registry: creation, resolution, removal

pub mod services;
