#![allow(async_fn_in_trait)]

use anyhow::Context as _;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use hearth_domain::id::TenantId;

use crate::entity as outbox_events;
use crate::event::{MAX_ATTEMPTS, OutboxEvent, backoff_secs};

/// Insert an outbox row on `conn`.
///
/// Call with the same `DatabaseTransaction` that writes the entity so both commit or
/// roll back together.
pub async fn record<C>(conn: &C, event: &OutboxEvent) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    outbox_events::ActiveModel {
        id: Set(event.id),
        tenant_id: Set(event.tenant_id.0),
        kind: Set(event.kind.clone()),
        aggregate_id: Set(event.aggregate_id),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(event.created_at),
        next_attempt_at: Set(event.created_at),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(conn)
    .await?;
    Ok(())
}

/// An outbox row picked up for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub kind: String,
    pub aggregate_id: Uuid,
    pub payload: serde_json::Value,
    pub attempts: i32,
}

/// What the relay needs from storage.
pub trait OutboxStore: Send + Sync {
    /// Unprocessed, unfailed events whose `next_attempt_at` has passed, oldest first.
    async fn fetch_due(&self, now: DateTime<Utc>, limit: u64)
    -> anyhow::Result<Vec<PendingEvent>>;

    async fn mark_processed(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()>;

    /// Record a failed attempt. `failed_at` is set when the event will not be retried.
    async fn mark_attempt_failed(
        &self,
        id: Uuid,
        attempts: i32,
        error: &str,
        next_attempt_at: DateTime<Utc>,
        failed_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<()>;
}

/// Decide the bookkeeping for a failed delivery.
///
/// Returns `(attempts, next_attempt_at, failed_at)`.
pub fn schedule_retry(
    previous_attempts: i32,
    now: DateTime<Utc>,
) -> (i32, DateTime<Utc>, Option<DateTime<Utc>>) {
    let attempts = previous_attempts + 1;
    let next = now + Duration::seconds(backoff_secs(attempts));
    let failed_at = (attempts >= MAX_ATTEMPTS).then_some(now);
    (attempts, next, failed_at)
}

#[derive(Clone)]
pub struct DbOutboxStore {
    pub db: DatabaseConnection,
}

impl OutboxStore for DbOutboxStore {
    async fn fetch_due(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> anyhow::Result<Vec<PendingEvent>> {
        let models = outbox_events::Entity::find()
            .filter(outbox_events::Column::ProcessedAt.is_null())
            .filter(outbox_events::Column::FailedAt.is_null())
            .filter(outbox_events::Column::NextAttemptAt.lte(now))
            .order_by_asc(outbox_events::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("fetch due outbox events")?;
        Ok(models.into_iter().map(pending_from_model).collect())
    }

    async fn mark_processed(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        outbox_events::ActiveModel {
            id: Set(id),
            processed_at: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark outbox event processed")?;
        Ok(())
    }

    async fn mark_attempt_failed(
        &self,
        id: Uuid,
        attempts: i32,
        error: &str,
        next_attempt_at: DateTime<Utc>,
        failed_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<()> {
        outbox_events::ActiveModel {
            id: Set(id),
            attempts: Set(attempts),
            last_error: Set(Some(error.to_owned())),
            next_attempt_at: Set(next_attempt_at),
            failed_at: Set(failed_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark outbox event attempt failed")?;
        Ok(())
    }
}

fn pending_from_model(model: outbox_events::Model) -> PendingEvent {
    PendingEvent {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        kind: model.kind,
        aggregate_id: model.aggregate_id,
        payload: model.payload,
        attempts: model.attempts,
    }
}
