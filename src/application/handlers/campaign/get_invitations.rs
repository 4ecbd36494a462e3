//! GetInvitationsHandler - Query handler for a user's open invitations.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Invitation};
use crate::domain::foundation::UserId;
use crate::ports::CampaignRepository;

#[derive(Debug, Clone)]
pub struct GetInvitationsQuery {
    pub user_id: UserId,
}

/// Returns the invitations `user_id` can still accept by creating a PJ.
///
/// Accepted invitations are left out.
pub struct GetInvitationsHandler {
    repository: Arc<dyn CampaignRepository>,
}

impl GetInvitationsHandler {
    pub fn new(repository: Arc<dyn CampaignRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetInvitationsQuery,
    ) -> Result<Vec<Invitation>, CampaignError> {
        let campaigns = self.repository.find_by_player(&query.user_id).await?;

        Ok(campaigns
            .iter()
            .flat_map(|c| c.invitations())
            .filter(|inv| inv.is_pending_for(&query.user_id))
            .cloned()
            .collect())
    }
}
