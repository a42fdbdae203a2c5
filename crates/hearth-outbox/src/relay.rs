#![allow(async_fn_in_trait)]

use std::time::Duration;

use anyhow::Context as _;
use chrono::Utc;
use deadpool_redis::Pool;

use crate::store::{OutboxStore, PendingEvent, schedule_retry};

/// Events fetched per poll.
pub const BATCH_SIZE: u64 = 50;

/// Destination for outbox events.
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &PendingEvent) -> anyhow::Result<()>;
}

/// Publishes each event as one entry on a Redis stream.
///
/// Entry fields: `event_id`, `kind`, `tenant_id`, `aggregate_id`, `payload` (JSON text).
#[derive(Clone)]
pub struct RedisStreamPublisher {
    pub pool: Pool,
    pub stream: String,
}

impl EventPublisher for RedisStreamPublisher {
    async fn publish(&self, event: &PendingEvent) -> anyhow::Result<()> {
        let mut conn = self.pool.get().await.context("get redis connection")?;
        let payload = serde_json::to_string(&event.payload).context("encode payload")?;
        let _entry_id: String = deadpool_redis::redis::cmd("XADD")
            .arg(&self.stream)
            .arg("*")
            .arg("event_id")
            .arg(event.id.to_string())
            .arg("kind")
            .arg(&event.kind)
            .arg("tenant_id")
            .arg(event.tenant_id.to_string())
            .arg("aggregate_id")
            .arg(event.aggregate_id.to_string())
            .arg("payload")
            .arg(payload)
            .query_async(&mut conn)
            .await
            .context("XADD outbox event")?;
        Ok(())
    }
}

/// Outcome of one relay pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayReport {
    pub published: usize,
    pub retried: usize,
    pub failed: usize,
}

/// Polls the outbox and hands due events to a publisher.
pub struct OutboxRelay<S: OutboxStore, P: EventPublisher> {
    pub store: S,
    pub publisher: P,
    pub poll_interval: Duration,
}

impl<S: OutboxStore, P: EventPublisher> OutboxRelay<S, P> {
    /// Publish every currently due event once.
    pub async fn relay_once(&self) -> anyhow::Result<RelayReport> {
        let now = Utc::now();
        let events = self.store.fetch_due(now, BATCH_SIZE).await?;
        let mut report = RelayReport::default();

        for event in &events {
            match self.publisher.publish(event).await {
                Ok(()) => {
                    self.store.mark_processed(event.id, Utc::now()).await?;
                    report.published += 1;
                }
                Err(e) => {
                    let (attempts, next, failed_at) = schedule_retry(event.attempts, Utc::now());
                    let message = format!("{e:#}");
                    self.store
                        .mark_attempt_failed(event.id, attempts, &message, next, failed_at)
                        .await?;
                    if failed_at.is_some() {
                        tracing::error!(
                            event_id = %event.id,
                            kind = %event.kind,
                            attempts,
                            error = %message,
                            "outbox event failed permanently"
                        );
                        report.failed += 1;
                    } else {
                        tracing::warn!(
                            event_id = %event.id,
                            kind = %event.kind,
                            attempts,
                            error = %message,
                            "outbox publish failed, will retry"
                        );
                        report.retried += 1;
                    }
                }
            }
        }

        if !events.is_empty() {
            tracing::debug!(
                published = report.published,
                retried = report.retried,
                failed = report.failed,
                "outbox relay pass"
            );
        }
        Ok(report)
    }

    /// Relay forever. Storage errors are logged and the loop continues on the next tick.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = self.relay_once().await {
                tracing::warn!(error = ?e, "outbox relay pass failed");
            }
        }
    }
}
