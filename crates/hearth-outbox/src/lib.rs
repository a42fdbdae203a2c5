//! Transactional outbox shared by every Hearth service.
//!
//! Use cases write integration events into `outbox_events` in the same transaction as
//! the entity change ([`store::record`]). [`relay::OutboxRelay`] later publishes due rows
//! to the bus and marks them processed, retrying with exponential backoff.

pub mod config;
pub mod entity;
pub mod event;
pub mod migration;
pub mod relay;
pub mod store;

pub use event::OutboxEvent;
