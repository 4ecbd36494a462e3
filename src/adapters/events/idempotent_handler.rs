//! IdempotentHandler - skips envelopes a handler has already applied.
//!
//! Queues deliver `xp_assigned` at least once, and crediting XP twice would
//! inflate a PJ's pools. Wrapping the consumer in this decorator records
//! every successfully handled `(event_id, handler name)` pair in a
//! `ProcessedEventStore` and drops redeliveries.
//!
//! ```ignore
//! let handler = IdempotentHandler::new(
//!     XpAssignedHandler::new(pj_repository),
//!     processed_event_store.clone(),
//! );
//! ```
//!
//! A failed attempt is not recorded, so the next delivery retries it.
//! Store errors are propagated.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, ProcessedEventStore};

/// Decorates an `EventHandler` with idempotency tracking keyed by its `name()`.
pub struct IdempotentHandler<H: EventHandler> {
    inner: H,
    processed_events: Arc<dyn ProcessedEventStore>,
    // check, handle and mark must not interleave within one process
    guard: Mutex<()>,
}

impl<H: EventHandler> IdempotentHandler<H> {
    pub fn new(inner: H, processed_events: Arc<dyn ProcessedEventStore>) -> Self {
        Self {
            inner,
            processed_events,
            guard: Mutex::new(()),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

#[async_trait]
impl<H: EventHandler + 'static> EventHandler for IdempotentHandler<H> {
    async fn handle(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
        let handler_name = self.inner.name();
        let _held = self.guard.lock().await;

        if self
            .processed_events
            .contains(&envelope.event_id, handler_name)
            .await?
        {
            tracing::debug!(
                event_id = %envelope.event_id,
                event_type = %envelope.event_type,
                handler = handler_name,
                "skipping already processed event"
            );
            return Ok(());
        }

        let event_id = envelope.event_id.clone();
        self.inner.handle(envelope).await?;

        self.processed_events
            .mark_processed(&event_id, handler_name)
            .await?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
