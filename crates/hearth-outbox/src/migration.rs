//! Schema for `outbox_events`, included by every service's migrator.

pub mod m20260101_000000_create_outbox_events;
