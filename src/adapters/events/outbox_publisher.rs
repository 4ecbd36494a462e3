//! OutboxPublisher - relays outbox entries to the event queue.
//!
//! The second half of the outbox hand-off:
//! 1. Repositories write envelopes to the outbox with their aggregate
//! 2. **OutboxPublisher polls the outbox and publishes to the queue**
//!
//! A failed publish marks the entry failed and ends the batch, so the entry
//! is retried first on the next poll and later events never overtake it.
//! Delivery is at-least-once: a crash between publish and `mark_published`
//! republishes the entry, which the consumer's idempotency absorbs.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `poll_interval` | 100ms | How often to check for unpublished events |
//! | `batch_size` | 100 | Max events to publish per poll cycle |
//!
//! ## Graceful Shutdown
//!
//! On shutdown the publisher relays one final batch before stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::DomainError;
use crate::ports::{EventPublisher, OutboxWriter};

/// Configuration for the OutboxPublisher service.
#[derive(Debug, Clone)]
pub struct OutboxPublisherConfig {
    /// How often to poll for unpublished events.
    pub poll_interval: Duration,

    /// Maximum events to process per poll cycle.
    pub batch_size: u32,
}

impl Default for OutboxPublisherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            batch_size: 100,
        }
    }
}

impl OutboxPublisherConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_batch_size(mut self, size: u32) -> Self {
        self.batch_size = size;
        self
    }
}

/// Background service that publishes events from the outbox.
pub struct OutboxPublisher {
    outbox: Arc<dyn OutboxWriter>,
    event_publisher: Arc<dyn EventPublisher>,
    config: OutboxPublisherConfig,
}

impl OutboxPublisher {
    pub fn new(outbox: Arc<dyn OutboxWriter>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self::with_config(outbox, event_publisher, OutboxPublisherConfig::default())
    }

    pub fn with_config(
        outbox: Arc<dyn OutboxWriter>,
        event_publisher: Arc<dyn EventPublisher>,
        config: OutboxPublisherConfig,
    ) -> Self {
        Self {
            outbox,
            event_publisher,
            config,
        }
    }

    /// Runs until `shutdown` turns true.
    ///
    /// Publish failures are recorded on the entry and never stop the loop;
    /// only outbox failures are returned.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        let mut interval = time::interval(self.config.poll_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    let stop = *shutdown.borrow();
                    if stop {
                        self.process_batch().await?;
                        tracing::info!("outbox publisher stopped");
                        return Ok(());
                    }
                }

                _ = interval.tick() => {
                    self.process_batch().await?;
                }
            }
        }
    }

    /// Publishes one batch of unpublished entries, oldest first.
    ///
    /// Returns how many were published.
    pub async fn process_batch(&self) -> Result<usize, DomainError> {
        let entries = self.outbox.get_pending(self.config.batch_size).await?;
        let mut published_count = 0;

        for entry in entries {
            match self.event_publisher.publish(entry.event.clone()).await {
                Ok(()) => {
                    self.outbox.mark_published(entry.id).await?;
                    published_count += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        event_id = %entry.event.event_id,
                        event_type = %entry.event.event_type,
                        attempts = entry.attempts + 1,
                        error = %e,
                        "failed to publish outbox entry, will retry"
                    );
                    self.outbox.mark_failed(entry.id, &e.to_string()).await?;
                    break;
                }
            }
        }

        if published_count > 0 {
            tracing::debug!(count = published_count, "outbox entries published");
        }
        Ok(published_count)
    }

    /// Run exactly one poll cycle.
    pub async fn poll_once(&self) -> Result<usize, DomainError> {
        self.process_batch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryOutbox;
    use crate::application::handlers::test_support::FlakyPublisher;
    use crate::domain::foundation::{EventEnvelope, EventId, EventMetadata, Timestamp};
    use crate::ports::OutboxStatus;
    use serde_json::json;

    fn test_envelope(id: &str) -> EventEnvelope {
        let now = Timestamp::now();
        EventEnvelope {
            event_id: EventId::from_string(id),
            event_type: "xp_assigned".to_string(),
            schema_version: 1,
            aggregate_id: "pj-1".to_string(),
            aggregate_type: "pj".to_string(),
            occurred_at: now,
            created_at: now,
            payload: json!({}),
            metadata: EventMetadata::default(),
        }
    }

    async fn outbox_with(ids: &[&str]) -> Arc<InMemoryOutbox> {
        let outbox = Arc::new(InMemoryOutbox::new());
        for id in ids {
            outbox.write(&test_envelope(id), "sess-1").await.unwrap();
        }
        outbox
    }

    #[tokio::test]
    async fn poll_once_publishes_pending_events() {
        let outbox = outbox_with(&["evt-1", "evt-2"]).await;
        let event_bus = Arc::new(InMemoryEventBus::new());

        let publisher = OutboxPublisher::new(outbox.clone(), event_bus.clone());
        let count = publisher.poll_once().await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(event_bus.event_count(), 2);
        assert_eq!(outbox.published_count().await, 2);
        assert_eq!(outbox.pending_count().await, 0);
    }

    #[tokio::test]
    async fn poll_once_respects_batch_size() {
        let outbox = outbox_with(&["evt-0", "evt-1", "evt-2", "evt-3", "evt-4"]).await;
        let event_bus = Arc::new(InMemoryEventBus::new());

        let config = OutboxPublisherConfig::default().with_batch_size(2);
        let publisher = OutboxPublisher::with_config(outbox.clone(), event_bus.clone(), config);

        assert_eq!(publisher.poll_once().await.unwrap(), 2);
        assert_eq!(publisher.poll_once().await.unwrap(), 2);
        assert_eq!(publisher.poll_once().await.unwrap(), 1);
        assert_eq!(publisher.poll_once().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn poll_once_with_no_pending_returns_zero() {
        let outbox = Arc::new(InMemoryOutbox::new());
        let publisher = OutboxPublisher::new(outbox, Arc::new(InMemoryEventBus::new()));

        assert_eq!(publisher.poll_once().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_publish_keeps_the_entry_for_the_next_poll() {
        let outbox = outbox_with(&["evt-1"]).await;
        let flaky = Arc::new(FlakyPublisher::failing_first(1));
        let publisher = OutboxPublisher::new(outbox.clone(), flaky.clone());

        assert_eq!(publisher.poll_once().await.unwrap(), 0);
        let entries = outbox.entries().await;
        assert_eq!(entries[0].status, OutboxStatus::Failed);
        assert_eq!(entries[0].attempts, 1);
        assert_eq!(entries[0].last_error.as_deref(), Some("[QUEUE_ERROR] Publish failed"));

        assert_eq!(publisher.poll_once().await.unwrap(), 1);
        assert_eq!(flaky.bus.event_count(), 1);
        assert_eq!(outbox.entries().await[0].status, OutboxStatus::Published);
    }

    #[tokio::test]
    async fn failure_stops_the_batch_so_order_is_kept() {
        let outbox = outbox_with(&["evt-1", "evt-2", "evt-3"]).await;
        let flaky = Arc::new(FlakyPublisher::failing_first(1));
        let publisher = OutboxPublisher::new(outbox.clone(), flaky.clone());

        assert_eq!(publisher.poll_once().await.unwrap(), 0);
        assert_eq!(outbox.pending_count().await, 3);

        assert_eq!(publisher.poll_once().await.unwrap(), 3);
        let order: Vec<String> = flaky
            .bus
            .published_events()
            .into_iter()
            .map(|e| e.event_id.as_str().to_string())
            .collect();
        assert_eq!(order, vec!["evt-1", "evt-2", "evt-3"]);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let outbox = outbox_with(&["evt-1"]).await;
        let event_bus = Arc::new(InMemoryEventBus::new());

        let config = OutboxPublisherConfig::default().with_poll_interval(Duration::from_millis(10));
        let publisher = OutboxPublisher::with_config(outbox, event_bus.clone(), config);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move { publisher.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        shutdown_tx.send(true).unwrap();

        let result = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(event_bus.event_count(), 1);
    }

    #[test]
    fn config_defaults_are_reasonable() {
        let config = OutboxPublisherConfig::default();

        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.batch_size, 100);
    }
}
