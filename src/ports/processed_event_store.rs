//! ProcessedEventStore port - Interface for tracking processed events.
//!
//! The XP hand-off is at-least-once: a queue may redeliver an `xp_assigned`
//! envelope after a crash or a requeue. Crediting XP is not idempotent, so
//! the consumer records which events each handler has already applied.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventId, Timestamp};

/// Port for tracking which events have been processed by which handlers.
///
/// Records are keyed by `(event_id, handler_name)` so several handlers can
/// consume the same event independently.
///
/// # Example
///
/// ```ignore
/// if store.contains(&event_id, "XpAssignedHandler").await? {
///     return Ok(());
/// }
/// // handle...
/// store.mark_processed(&event_id, "XpAssignedHandler").await?;
/// ```
#[async_trait]
pub trait ProcessedEventStore: Send + Sync {
    /// Returns `true` if the event has already been processed by this handler.
    async fn contains(&self, event_id: &EventId, handler_name: &str) -> Result<bool, DomainError>;

    /// Mark an event as processed by a specific handler.
    ///
    /// Called AFTER successful handling so a failed attempt is retried.
    async fn mark_processed(&self, event_id: &EventId, handler_name: &str) -> Result<(), DomainError>;

    /// Delete entries recorded before `timestamp`. Returns how many were removed.
    async fn delete_before(&self, timestamp: Timestamp) -> Result<u64, DomainError>;
}
