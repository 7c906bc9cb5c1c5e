//! Domain layer containing business entities and the short-code codec.
//!
//! # Architecture
//!
//! - [`codec`] - Salted, reversible identifier ↔ code transform
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Registry logic lives in [`crate::application::services`].

pub mod codec;
pub mod entities;
pub mod repositories;
