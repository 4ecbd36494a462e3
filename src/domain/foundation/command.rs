//! Command infrastructure for CQRS handlers.
//!
//! Every handler accepts a single `CommandMetadata` carrying the acting user
//! and correlation context, and stamps it onto the envelopes it publishes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventEnvelope, UserId};

/// Metadata context for command handlers.
///
/// # Example
///
/// ```ignore
/// let envelope = metadata.stamp(event.to_envelope());
/// self.repository.update(&pj, &[envelope]).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// ID of the event that triggered this command, when it came from the worker.
    #[serde(skip_serializing_if = "Option::is_none")]
    causation_id: Option<String>,

    /// Source of this command (e.g., "api", "worker").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            causation_id: None,
            source: None,
        }
    }

    /// Metadata for commands issued by the event worker in reaction to an envelope.
    ///
    /// Correlation is inherited from the triggering envelope and the envelope's
    /// id becomes the causation id.
    pub fn caused_by(envelope: &EventEnvelope) -> Self {
        let user_id = envelope
            .metadata
            .user_id
            .as_deref()
            .and_then(|id| UserId::new(id).ok())
            .unwrap_or_else(UserId::system);

        Self {
            user_id,
            correlation_id: envelope.metadata.correlation_id.clone(),
            causation_id: Some(envelope.event_id.to_string()),
            source: Some("worker".to_string()),
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// Returns the causation ID if set.
    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Applies correlation, causation and user context to an outgoing envelope.
    pub fn stamp(&self, envelope: EventEnvelope) -> EventEnvelope {
        let envelope = envelope
            .with_correlation_id(self.correlation_id())
            .with_user_id(self.user_id.to_string());

        match &self.causation_id {
            Some(cause) => envelope.with_causation_id(cause.clone()),
            None => envelope,
        }
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a test user ID.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-user-123").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}
