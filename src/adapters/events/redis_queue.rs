//! Redis list-backed event queue for production deployments.
//!
//! Producers `RPUSH` JSON-serialized envelopes onto a list and the worker
//! pops them with `BLPOP`. A popped envelope is gone from Redis, so the
//! worker pushes it back with `requeue` when its handler fails.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventPublisher, EventSource};

/// Redis-backed `EventPublisher` + `EventSource`.
#[derive(Clone)]
pub struct RedisEventQueue {
    conn: MultiplexedConnection,
    queue_name: String,
}

impl RedisEventQueue {
    pub fn new(conn: MultiplexedConnection, queue_name: impl Into<String>) -> Self {
        Self {
            conn,
            queue_name: queue_name.into(),
        }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, queue_name: impl Into<String>) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(queue_error)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(queue_error)?;
        Ok(Self::new(conn, queue_name))
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    async fn push(&self, events: &[EventEnvelope]) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }
        let payloads = events
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<String>, _>>()?;

        let mut conn = self.conn.clone();
        conn.rpush::<_, _, ()>(&self.queue_name, payloads)
            .await
            .map_err(queue_error)
    }
}

fn queue_error(err: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::QueueError, err.to_string())
}

/// Decodes a popped payload.
///
/// The payload is already off the list, so an undecodable one cannot be
/// retried. It is logged in full and skipped instead of being reported as
/// a queue failure.
fn decode_payload(queue_name: &str, payload: &str) -> Option<EventEnvelope> {
    match serde_json::from_str(payload) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            tracing::error!(
                queue = %queue_name,
                error = %e,
                payload = %payload,
                "malformed envelope dropped"
            );
            None
        }
    }
}

/// BLPOP takes its timeout in seconds; zero would block forever.
fn blpop_timeout_secs(timeout: Duration) -> f64 {
    timeout.as_secs_f64().max(0.01)
}

#[async_trait]
impl EventPublisher for RedisEventQueue {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.push(std::slice::from_ref(&event)).await?;
        tracing::debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            queue = %self.queue_name,
            "event published"
        );
        Ok(())
    }

    /// One `RPUSH` for the whole batch, so the events land together and in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        self.push(&events).await?;
        tracing::debug!(count = events.len(), queue = %self.queue_name, "events published");
        Ok(())
    }
}

#[async_trait]
impl EventSource for RedisEventQueue {
    async fn receive(&self, timeout: Duration) -> Result<Option<EventEnvelope>, DomainError> {
        let mut conn = self.conn.clone();
        let popped: Option<(String, String)> = redis::cmd("BLPOP")
            .arg(&self.queue_name)
            .arg(blpop_timeout_secs(timeout))
            .query_async(&mut conn)
            .await
            .map_err(queue_error)?;

        Ok(popped.and_then(|(_, payload)| decode_payload(&self.queue_name, &payload)))
    }

    async fn requeue(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.push(std::slice::from_ref(&event)).await?;
        tracing::warn!(
            event_id = %event.event_id,
            queue = %self.queue_name,
            "event requeued"
        );
        Ok(())
    }
}
