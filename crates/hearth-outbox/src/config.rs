use std::time::Duration;

use anyhow::Context as _;
use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;

use crate::relay::{OutboxRelay, RedisStreamPublisher};
use crate::store::DbOutboxStore;

/// Default relay poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Outbox relay settings shared by every service.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// `REDIS_URL`. When unset the relay is not started and events stay in the table.
    pub redis_url: Option<String>,
    /// `OUTBOX_STREAM`, default `hearth:<service>:events`.
    pub stream: String,
    /// `OUTBOX_POLL_INTERVAL_MS`.
    pub poll_interval: Duration,
}

impl RelayConfig {
    pub fn from_env(service: &str) -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            stream: std::env::var("OUTBOX_STREAM")
                .unwrap_or_else(|_| default_stream(service)),
            poll_interval: Duration::from_millis(
                std::env::var("OUTBOX_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
        }
    }
}

pub fn default_stream(service: &str) -> String {
    format!("hearth:{service}:events")
}

/// Start the Redis relay in the background when `REDIS_URL` is configured.
pub fn spawn_relay(
    db: DatabaseConnection,
    config: &RelayConfig,
) -> anyhow::Result<Option<JoinHandle<()>>> {
    let Some(url) = config.redis_url.as_deref() else {
        tracing::info!("REDIS_URL not set, outbox relay disabled");
        return Ok(None);
    };
    let pool = deadpool_redis::Config::from_url(url)
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .context("create Redis pool")?;
    let relay = OutboxRelay {
        store: DbOutboxStore { db },
        publisher: RedisStreamPublisher {
            pool,
            stream: config.stream.clone(),
        },
        poll_interval: config.poll_interval,
    };
    tracing::info!(stream = %config.stream, "outbox relay started");
    Ok(Some(tokio::spawn(relay.run())))
}
