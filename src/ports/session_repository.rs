//! Session repository port (write side).
//!
//! Sessions are immutable, so there is no update operation.

use async_trait::async_trait;

use crate::domain::foundation::{CampaignId, DomainError, EventEnvelope, SessionId};
use crate::domain::session::Session;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session together with its `session_created` and
    /// `xp_assigned` envelopes.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure; neither the session nor
    ///   its events are stored
    async fn save(&self, session: &Session, events: &[EventEnvelope]) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// All sessions of a campaign, oldest first.
    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Session>, DomainError>;
}
