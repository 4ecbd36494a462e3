//! OutboxWriter port - events persisted together with their aggregate.
//!
//! A command handler never publishes directly. It passes the stamped
//! envelopes to the repository write that persists the aggregate, and the
//! repository records them in the outbox as part of that same write. The
//! `OutboxPublisher` relays pending entries to the queue afterwards, so a
//! saved aggregate cannot lose its events to a transport failure.
//!
//! 1. Handler calls `repository.save(&aggregate, &envelopes)`
//! 2. The repository stores the aggregate and writes the outbox entries
//! 3. `OutboxPublisher` publishes pending entries and marks them published

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, EventEnvelope, Timestamp};

/// Status of an outbox entry in the delivery pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboxStatus {
    /// Written but not yet published
    Pending,
    /// Handed to the queue
    Published,
    /// Last publish attempt failed; retried on the next poll
    Failed,
}

/// An event waiting in, or already relayed from, the outbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub id: Uuid,

    pub event: EventEnvelope,

    pub status: OutboxStatus,

    /// When the entry was written
    pub created_at: Timestamp,

    /// When the entry was last published or failed
    pub processed_at: Option<Timestamp>,

    /// Number of publish attempts
    pub attempts: u32,

    pub last_error: Option<String>,

    /// Id of the aggregate whose write produced the event
    pub partition_key: String,
}

impl OutboxEntry {
    /// Creates a pending entry.
    pub fn new(event: EventEnvelope, partition_key: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event,
            status: OutboxStatus::Pending,
            created_at: Timestamp::now(),
            processed_at: None,
            attempts: 0,
            last_error: None,
            partition_key: partition_key.into(),
        }
    }

    pub fn mark_published(&mut self) {
        self.status = OutboxStatus::Published;
        self.processed_at = Some(Timestamp::now());
        self.attempts += 1;
    }

    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = OutboxStatus::Failed;
        self.processed_at = Some(Timestamp::now());
        self.attempts += 1;
        self.last_error = Some(error.into());
    }

    /// Pending and failed entries still need publishing.
    pub fn is_unpublished(&self) -> bool {
        self.status != OutboxStatus::Published
    }
}

/// Port for the event outbox.
///
/// Repositories call `write_batch` inside their own write so the aggregate
/// and its events are stored together or not at all.
///
/// # Example
///
/// ```ignore
/// // inside a repository's save, under the same lock or transaction
/// self.outbox.write_batch(events, pj.id().as_str()).await?;
/// pjs.insert(pj.id().clone(), pj.clone());
/// ```
#[async_trait]
pub trait OutboxWriter: Send + Sync {
    /// Write a single event to the outbox.
    async fn write(
        &self,
        event: &EventEnvelope,
        partition_key: &str,
    ) -> Result<OutboxEntry, DomainError>;

    /// Write several events at once, keeping their order.
    async fn write_batch(
        &self,
        events: &[EventEnvelope],
        partition_key: &str,
    ) -> Result<Vec<OutboxEntry>, DomainError>;

    /// Up to `limit` unpublished entries (pending or failed), oldest first.
    async fn get_pending(&self, limit: u32) -> Result<Vec<OutboxEntry>, DomainError>;

    async fn mark_published(&self, id: Uuid) -> Result<(), DomainError>;

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), DomainError>;

    /// Delete published entries processed before `older_than`.
    ///
    /// Unpublished entries are never deleted. Returns how many were removed.
    async fn cleanup_old(&self, older_than: Timestamp) -> Result<u64, DomainError>;
}
