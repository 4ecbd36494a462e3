//! EventPublisher port - Interface for publishing domain events.
//!
//! Command handlers do not publish directly; their events go through the
//! outbox and `OutboxPublisher` hands them to this port. The transport
//! (in-memory bus, Redis list) is hidden behind this trait.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (consumers may receive duplicates)
/// - Events of one `publish_all` call keep their order
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// for entry in outbox.get_pending(100).await? {
///     publisher.publish(entry.event.clone()).await?;
/// }
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// Adapters that cannot publish atomically publish sequentially and stop
    /// at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
