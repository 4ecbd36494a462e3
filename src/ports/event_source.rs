//! EventSource port - the consuming side of the event queue.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for pulling published events off a queue.
///
/// A received envelope is removed from the queue. If processing fails the
/// consumer hands it back with `requeue`, giving at-least-once delivery.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Waits up to `timeout` for the next envelope.
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    async fn receive(&self, timeout: Duration) -> Result<Option<EventEnvelope>, DomainError>;

    /// Puts an envelope back at the end of the queue.
    async fn requeue(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
