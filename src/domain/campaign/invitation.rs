//! Campaign invitations.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CampaignId, InvitationId, UserId};

/// Invitation lifecycle: `Pending` until the player creates a PJ, then
/// `Accepted` for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationState {
    Pending,
    Accepted,
}

/// A per-user admission ticket to one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    campaign_id: CampaignId,
    user_id: UserId,
    state: InvitationState,
}

impl Invitation {
    /// Creates a pending invitation.
    pub fn new(id: InvitationId, campaign_id: CampaignId, user_id: UserId) -> Self {
        Self {
            id,
            campaign_id,
            user_id,
            state: InvitationState::Pending,
        }
    }

    pub fn id(&self) -> &InvitationId {
        &self.id
    }

    pub fn campaign_id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn state(&self) -> InvitationState {
        self.state
    }

    pub fn is_pending_for(&self, user_id: &UserId) -> bool {
        self.state == InvitationState::Pending && &self.user_id == user_id
    }

    /// Accepts a pending invitation. Returns false if it was already accepted.
    pub(crate) fn accept(&mut self) -> bool {
        match self.state {
            InvitationState::Pending => {
                self.state = InvitationState::Accepted;
                true
            }
            InvitationState::Accepted => false,
        }
    }
}
