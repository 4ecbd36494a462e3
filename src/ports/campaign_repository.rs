//! Campaign repository port (write side).

use async_trait::async_trait;

use crate::domain::campaign::Campaign;
use crate::domain::foundation::{CampaignId, DomainError, EventEnvelope, UserId};

/// Repository port for Campaign aggregate persistence.
///
/// PJs are stored through `PjRepository`; a campaign only keeps their ids.
/// Writes take the envelopes the change produced and record them in the
/// outbox together with the campaign: either both are stored or neither.
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Save a new campaign and its events.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, campaign: &Campaign, events: &[EventEnvelope]) -> Result<(), DomainError>;

    /// Update an existing campaign (invitations, PJ membership) and record its events.
    ///
    /// # Errors
    ///
    /// - `CampaignNotFound` if the campaign doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, campaign: &Campaign, events: &[EventEnvelope]) -> Result<(), DomainError>;

    /// Find a campaign by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError>;

    /// Campaigns run by `master_id`, newest first.
    async fn find_by_master(&self, master_id: &UserId) -> Result<Vec<Campaign>, DomainError>;

    /// Campaigns `user_id` has been invited to, whatever the invitation's
    /// state, newest first.
    async fn find_by_player(&self, user_id: &UserId) -> Result<Vec<Campaign>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CampaignRepository) {}
    }
}
