//! Campaign aggregate.
//!
//! A campaign is run by one master. Players join by invitation and each
//! accepted invitation yields exactly one PJ.
//!
//! # Ownership
//!
//! Campaigns reference their PJs by ID. PJs are persisted and updated
//! independently through the PJ repository.

use serde::{Deserialize, Serialize};

use super::events::{CampaignCreated, PjAdded, UserInvited};
use super::{CampaignError, Invitation, Pj, PjCreateParams};
use crate::domain::foundation::{
    CampaignId, EventId, InvitationId, PjId, Timestamp, UserId, ValidationError,
};
use crate::domain::user::User;
use crate::ports::IdGenerator;

/// Campaign aggregate.
///
/// # Invariants
///
/// - a PJ is only added for a user holding a pending invitation
/// - an invitation is accepted at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    id: CampaignId,
    master_id: UserId,
    name: String,
    invitations: Vec<Invitation>,
    pj_ids: Vec<PjId>,
    created_at: Timestamp,
}

impl Campaign {
    /// Opens a new campaign for `master_id`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is blank or the generated id is empty
    pub fn new(
        master_id: UserId,
        name: impl Into<String>,
        ids: &dyn IdGenerator,
    ) -> Result<(Self, CampaignCreated), CampaignError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }

        let campaign = Self {
            id: CampaignId::new(ids.generate_id())?,
            master_id,
            name,
            invitations: Vec::new(),
            pj_ids: Vec::new(),
            created_at: Timestamp::now(),
        };

        let event = CampaignCreated {
            event_id: EventId::new(),
            campaign_id: campaign.id.clone(),
            master_id: campaign.master_id.clone(),
            name: campaign.name.clone(),
            created_at: campaign.created_at,
        };

        Ok((campaign, event))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &CampaignId {
        &self.id
    }

    pub fn master_id(&self) -> &UserId {
        &self.master_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    pub fn pj_ids(&self) -> &[PjId] {
        &self.pj_ids
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn contains_pj(&self, pj_id: &PjId) -> bool {
        self.pj_ids.contains(pj_id)
    }

    /// The pending invitation of `user_id`, if any.
    pub fn pending_invitation_for(&self, user_id: &UserId) -> Option<&Invitation> {
        self.invitations.iter().find(|inv| inv.is_pending_for(user_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Invites a player.
    ///
    /// Inviting a user that already holds an invitation creates another one.
    ///
    /// # Errors
    ///
    /// - `UserNotPlayer` if the user lacks the player role
    pub fn invite_user(
        &mut self,
        user: &User,
        ids: &dyn IdGenerator,
    ) -> Result<(Invitation, UserInvited), CampaignError> {
        if !user.is_player() {
            return Err(CampaignError::UserNotPlayer(user.id().clone()));
        }

        let invitation = Invitation::new(
            InvitationId::new(ids.generate_id())?,
            self.id.clone(),
            user.id().clone(),
        );
        self.invitations.push(invitation.clone());

        let event = UserInvited {
            event_id: EventId::new(),
            invitation_id: invitation.id().clone(),
            campaign_id: self.id.clone(),
            user_id: user.id().clone(),
            invited_at: Timestamp::now(),
        };

        Ok((invitation, event))
    }

    /// Creates the PJ of an invited player and accepts their invitation.
    ///
    /// # Errors
    ///
    /// - `UserNotInvited` if the user has no pending invitation
    /// - `Validation` if the creation params are out of range
    pub fn add_pj(
        &mut self,
        user_id: &UserId,
        params: PjCreateParams,
        ids: &dyn IdGenerator,
    ) -> Result<(Pj, PjAdded), CampaignError> {
        let position = self
            .invitations
            .iter()
            .position(|inv| inv.is_pending_for(user_id))
            .ok_or_else(|| CampaignError::UserNotInvited(user_id.clone()))?;

        params.validate()?;
        let pj_id = PjId::new(ids.generate_id())?;

        self.invitations[position].accept();

        let pj = Pj::new(pj_id, self.id.clone(), user_id.clone(), params);
        self.pj_ids.push(pj.id().clone());

        let event = PjAdded {
            event_id: EventId::new(),
            pj_id: pj.id().clone(),
            campaign_id: self.id.clone(),
            user_id: user_id.clone(),
            pj_type: pj.pj_type(),
            added_at: Timestamp::now(),
        };

        Ok((pj, event))
    }

    /// Checks that every id belongs to this campaign.
    ///
    /// # Errors
    ///
    /// - `PjsNotInCampaign` listing the ids that do not
    pub fn must_contain_pjs(&self, pj_ids: &[PjId]) -> Result<(), CampaignError> {
        let missing: Vec<PjId> = pj_ids
            .iter()
            .filter(|id| !self.contains_pj(id))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CampaignError::PjsNotInCampaign(missing))
        }
    }
}
