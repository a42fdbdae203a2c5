//! Test utilities for Hearth services.
//!
//! Import from `[dev-dependencies]` only, never in production code.

pub mod auth;
pub mod response;
