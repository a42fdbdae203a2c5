//! Integration events published by every service through its outbox.

use serde::Serialize;
use uuid::Uuid;

/// An event that leaves the bounded context that raised it.
///
/// `KIND` is the routing key on the bus (`"<aggregate>.<verb>"`, e.g.
/// `"intake.recorded"`). `event_id` must be unique per occurrence; it forms the
/// outbox idempotency key together with `KIND`.
pub trait IntegrationEvent: Serialize {
    const KIND: &'static str;

    fn event_id(&self) -> Uuid;

    /// Identifier of the entity the event is about.
    fn aggregate_id(&self) -> Uuid;
}

/// Build the idempotency key stored alongside an outbox row.
pub fn idempotency_key<E: IntegrationEvent>(event: &E) -> String {
    format!("{}:{}", E::KIND, event.event_id())
}
