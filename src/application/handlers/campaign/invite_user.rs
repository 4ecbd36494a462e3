//! InviteUserHandler - Command handler for inviting a player to a campaign.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Invitation, UserInvited};
use crate::domain::foundation::{CampaignId, CommandMetadata, SerializableDomainEvent, UserId};
use crate::ports::{CampaignRepository, IdGenerator, UserRepository};

#[derive(Debug, Clone)]
pub struct InviteUserCommand {
    pub campaign_id: CampaignId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct InviteUserResult {
    pub invitation: Invitation,
    pub event: UserInvited,
}

/// Handler for inviting users.
///
/// Only users with the player role can be invited. Inviting the same user
/// again yields a second pending invitation.
pub struct InviteUserHandler {
    campaigns: Arc<dyn CampaignRepository>,
    users: Arc<dyn UserRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl InviteUserHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        users: Arc<dyn UserRepository>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            campaigns,
            users,
            ids,
        }
    }

    pub async fn handle(
        &self,
        cmd: InviteUserCommand,
        metadata: CommandMetadata,
    ) -> Result<InviteUserResult, CampaignError> {
        let mut campaign = self
            .campaigns
            .find_by_id(&cmd.campaign_id)
            .await?
            .ok_or_else(|| CampaignError::CampaignNotFound(cmd.campaign_id.clone()))?;

        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| CampaignError::UserNotFound(cmd.user_id.clone()))?;

        let (invitation, event) = campaign.invite_user(&user, self.ids.as_ref())?;

        self.campaigns
            .update(&campaign, &[metadata.stamp(event.to_envelope())])
            .await?;

        tracing::info!(
            campaign_id = %campaign.id(),
            user_id = %user.id(),
            invitation_id = %invitation.id(),
            "user invited"
        );

        Ok(InviteUserResult { invitation, event })
    }
}
