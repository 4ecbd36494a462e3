//! In-memory FIFO queue implementing both sides of the event hand-off.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{timeout_at, Instant};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventPublisher, EventSource};

/// Process-local stand-in for the Redis queue.
///
/// # Panics
///
/// Panics if the internal lock is poisoned. Not for production use.
#[derive(Default)]
pub struct InMemoryEventQueue {
    queue: Mutex<VecDeque<EventEnvelope>>,
    arrived: Notify,
}

impl InMemoryEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of envelopes waiting.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the waiting envelopes, head first.
    pub fn pending(&self) -> Vec<EventEnvelope> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<EventEnvelope>> {
        self.queue
            .lock()
            .expect("InMemoryEventQueue: queue lock poisoned")
    }

    fn push(&self, event: EventEnvelope) {
        self.lock().push_back(event);
        self.arrived.notify_one();
    }

    fn pop(&self) -> Option<EventEnvelope> {
        self.lock().pop_front()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventQueue {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.push(event);
        }
        Ok(())
    }
}

#[async_trait]
impl EventSource for InMemoryEventQueue {
    async fn receive(&self, timeout: Duration) -> Result<Option<EventEnvelope>, DomainError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(event) = self.pop() {
                return Ok(Some(event));
            }
            if timeout_at(deadline, self.arrived.notified()).await.is_err() {
                return Ok(self.pop());
            }
        }
    }

    async fn requeue(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.push(event);
        Ok(())
    }
}
