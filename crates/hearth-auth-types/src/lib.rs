//! Auth types shared across Hearth services.
//!
//! Provides JWT validation (and issuing, for the identity service) plus the
//! gateway-injected `Identity` extractor.

pub mod identity;
pub mod token;
