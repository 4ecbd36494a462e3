//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types, event infrastructure and
//! command metadata shared by every aggregate.

mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{CampaignId, InvitationId, PjId, SessionId, UserId};
pub use timestamp::Timestamp;
