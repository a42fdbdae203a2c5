use chrono::{DateTime, Utc};
use uuid::Uuid;

use hearth_domain::event::{IntegrationEvent, idempotency_key};
use hearth_domain::id::TenantId;

/// A row to be written to `outbox_events`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub kind: String,
    pub aggregate_id: Uuid,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

impl OutboxEvent {
    /// Serialize an integration event into an outbox record for `tenant`.
    pub fn from_event<E: IntegrationEvent>(
        tenant_id: TenantId,
        event: &E,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Uuid::now_v7(),
            tenant_id,
            kind: E::KIND.to_owned(),
            aggregate_id: event.aggregate_id(),
            payload: serde_json::to_value(event)?,
            idempotency_key: idempotency_key(event),
            created_at: Utc::now(),
        })
    }
}

/// Maximum delivery attempts before an event is parked with `failed_at`.
pub const MAX_ATTEMPTS: i32 = 10;

/// Upper bound on the retry delay.
pub const MAX_BACKOFF_SECS: i64 = 300;

/// Delay before the next attempt after `attempts` failures: 2, 4, 8 … capped at 5 min.
pub fn backoff_secs(attempts: i32) -> i64 {
    let exp = attempts.clamp(1, 16) as u32;
    2i64.pow(exp).min(MAX_BACKOFF_SECS)
}
