//! EventWorker - the consuming end of the event hand-off.
//!
//! Pulls envelopes from an `EventSource` and hands each one to a single
//! `EventHandler`. Delivery is at-least-once:
//!
//! 1. `receive` removes the envelope from the queue
//! 2. the handler runs
//! 3. on failure the envelope is put back with `requeue`
//!
//! ## Graceful Shutdown
//!
//! The worker checks its shutdown signal between envelopes, so an envelope
//! that is being handled always completes. The receive timeout bounds how
//! long shutdown waits on an idle queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::Instrument;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventSource};

/// Configuration for the EventWorker.
#[derive(Debug, Clone)]
pub struct EventWorkerConfig {
    /// How long a single receive waits for an envelope.
    pub receive_timeout: Duration,

    /// Pause after the queue itself fails before trying again.
    pub error_backoff: Duration,
}

impl Default for EventWorkerConfig {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_secs(5),
            error_backoff: Duration::from_secs(1),
        }
    }
}

impl EventWorkerConfig {
    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    pub fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }
}

/// What happened during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Nothing arrived before the receive timeout.
    Idle,
    /// The handler accepted the envelope.
    Handled,
    /// The handler failed and the envelope went back on the queue.
    Requeued,
}

pub struct EventWorker {
    source: Arc<dyn EventSource>,
    handler: Arc<dyn EventHandler>,
    config: EventWorkerConfig,
}

impl EventWorker {
    pub fn new(source: Arc<dyn EventSource>, handler: Arc<dyn EventHandler>) -> Self {
        Self::with_config(source, handler, EventWorkerConfig::default())
    }

    pub fn with_config(
        source: Arc<dyn EventSource>,
        handler: Arc<dyn EventHandler>,
        config: EventWorkerConfig,
    ) -> Self {
        Self {
            source,
            handler,
            config,
        }
    }

    /// Runs until `shutdown` turns true.
    ///
    /// Queue failures are logged and retried after `error_backoff`; they
    /// never stop the loop.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), DomainError> {
        tracing::info!(handler = self.handler.name(), "event worker started");

        loop {
            let stop = *shutdown.borrow();
            if stop {
                break;
            }
            if let Err(e) = self.poll_once().await {
                tracing::error!(error = %e, "event queue unavailable");
                tokio::select! {
                    _ = shutdown.changed() => {}
                    _ = time::sleep(self.config.error_backoff) => {}
                }
            }
        }

        tracing::info!(handler = self.handler.name(), "event worker stopped");
        Ok(())
    }

    /// Receives and dispatches at most one envelope.
    ///
    /// # Errors
    ///
    /// Only queue failures (`receive`, `requeue`) are returned. A handler
    /// failure is reported as `Delivery::Requeued`.
    pub async fn poll_once(&self) -> Result<Delivery, DomainError> {
        let Some(envelope) = self.source.receive(self.config.receive_timeout).await? else {
            return Ok(Delivery::Idle);
        };

        let span = tracing::info_span!(
            "event",
            event_id = %envelope.event_id,
            event_type = %envelope.event_type,
            aggregate_id = %envelope.aggregate_id,
        );
        self.dispatch(envelope).instrument(span).await
    }

    async fn dispatch(&self, envelope: EventEnvelope) -> Result<Delivery, DomainError> {
        match self.handler.handle(envelope.clone()).await {
            Ok(()) => {
                tracing::debug!(handler = self.handler.name(), "event handled");
                Ok(Delivery::Handled)
            }
            Err(e) => {
                tracing::warn!(
                    handler = self.handler.name(),
                    error = %e,
                    "event handler failed, requeueing"
                );
                self.source.requeue(envelope).await?;
                Ok(Delivery::Requeued)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventQueue;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::EventPublisher;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
        fail_first: Mutex<usize>,
    }

    impl RecordingHandler {
        fn new() -> Self {
            Self::failing_first(0)
        }

        fn failing_first(n: usize) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail_first: Mutex::new(n),
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
            {
                let mut remaining = self.fail_first.lock().unwrap();
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(DomainError::new(ErrorCode::DatabaseError, "unavailable"));
                }
            }
            self.seen.lock().unwrap().push(event.aggregate_id);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "RecordingHandler"
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl EventSource for BrokenSource {
        async fn receive(&self, _: Duration) -> Result<Option<EventEnvelope>, DomainError> {
            Err(DomainError::new(ErrorCode::QueueError, "connection refused"))
        }

        async fn requeue(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::QueueError, "connection refused"))
        }
    }

    fn envelope(aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new("xp_assigned", aggregate_id, "pj", json!({}))
    }

    fn fast_config() -> EventWorkerConfig {
        EventWorkerConfig::default()
            .with_receive_timeout(Duration::from_millis(10))
            .with_error_backoff(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn poll_once_is_idle_on_empty_queue() {
        let worker = EventWorker::with_config(
            Arc::new(InMemoryEventQueue::new()),
            Arc::new(RecordingHandler::new()),
            fast_config(),
        );

        assert_eq!(worker.poll_once().await.unwrap(), Delivery::Idle);
    }

    #[tokio::test]
    async fn handled_envelope_leaves_the_queue() {
        let queue = Arc::new(InMemoryEventQueue::new());
        let handler = Arc::new(RecordingHandler::new());
        queue.publish(envelope("pj-1")).await.unwrap();
        let worker = EventWorker::with_config(queue.clone(), handler.clone(), fast_config());

        assert_eq!(worker.poll_once().await.unwrap(), Delivery::Handled);
        assert_eq!(handler.seen(), vec!["pj-1"]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn failed_envelope_is_requeued_and_retried() {
        let queue = Arc::new(InMemoryEventQueue::new());
        let handler = Arc::new(RecordingHandler::failing_first(1));
        queue.publish(envelope("pj-1")).await.unwrap();
        let worker = EventWorker::with_config(queue.clone(), handler.clone(), fast_config());

        assert_eq!(worker.poll_once().await.unwrap(), Delivery::Requeued);
        assert_eq!(queue.len(), 1);

        assert_eq!(worker.poll_once().await.unwrap(), Delivery::Handled);
        assert_eq!(handler.seen(), vec!["pj-1"]);
    }

    #[tokio::test]
    async fn queue_failure_is_returned() {
        let worker = EventWorker::with_config(
            Arc::new(BrokenSource),
            Arc::new(RecordingHandler::new()),
            fast_config(),
        );

        let err = worker.poll_once().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::QueueError);
    }

    #[tokio::test]
    async fn run_drains_queue_and_stops_on_shutdown() {
        let queue = Arc::new(InMemoryEventQueue::new());
        let handler = Arc::new(RecordingHandler::new());
        queue
            .publish_all(vec![envelope("pj-1"), envelope("pj-2")])
            .await
            .unwrap();
        let worker = EventWorker::with_config(queue.clone(), handler.clone(), fast_config());
        let (tx, rx) = watch::channel(false);

        let running = tokio::spawn(async move { worker.run(rx).await });
        for _ in 0..100 {
            if handler.seen().len() == 2 {
                break;
            }
            time::sleep(Duration::from_millis(5)).await;
        }
        tx.send(true).unwrap();

        running.await.unwrap().unwrap();
        assert_eq!(handler.seen(), vec!["pj-1", "pj-2"]);
    }

    #[tokio::test]
    async fn run_survives_queue_outage_until_shutdown() {
        let worker = EventWorker::with_config(
            Arc::new(BrokenSource),
            Arc::new(RecordingHandler::new()),
            fast_config(),
        );
        let (tx, rx) = watch::channel(false);

        let running = tokio::spawn(async move { worker.run(rx).await });
        time::sleep(Duration::from_millis(30)).await;
        tx.send(true).unwrap();

        assert!(running.await.unwrap().is_ok());
    }
}
