//! HTTP and persistence plumbing shared by every Hearth service.

pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tenant;
pub mod tracing;
