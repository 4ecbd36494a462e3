//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! Used for in-process dispatch and by the event worker, which feeds queued
//! envelopes to a single `EventHandler`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Delivery is at-least-once. Handlers that are not naturally idempotent
/// (crediting XP is not) should be wrapped in `IdempotentHandler`.
///
/// # Example
///
/// ```ignore
/// #[async_trait]
/// impl EventHandler for XpAssignedHandler {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: XpAssignedPayload = event.payload_as()?;
///         // credit the PJ...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "XpAssignedHandler"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event. An error asks the transport to redeliver it.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging and idempotency tracking.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// # Example
///
/// ```ignore
/// subscriber.subscribe("xp_assigned", xp_assigned_handler);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
