//! Domain types shared across all Hearth services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod event;
pub mod field;
pub mod id;
pub mod pagination;
