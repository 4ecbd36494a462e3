//! CreatePjHandler - Command handler for an invited player creating their PJ.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Pj, PjAdded, PjCreateParams};
use crate::domain::foundation::{CampaignId, CommandMetadata, SerializableDomainEvent, UserId};
use crate::ports::{CampaignRepository, IdGenerator, PjRepository};

#[derive(Debug, Clone)]
pub struct CreatePjCommand {
    pub campaign_id: CampaignId,
    /// The invited player the PJ belongs to.
    pub user_id: UserId,
    pub params: PjCreateParams,
}

#[derive(Debug, Clone)]
pub struct CreatePjResult {
    pub pj: Pj,
    pub event: PjAdded,
}

/// Handler for creating PJs.
///
/// Consumes the player's pending invitation. The PJ is saved before the
/// campaign so the campaign never lists an id that cannot be loaded;
/// `pj_added` is written with the campaign update that records the PJ.
pub struct CreatePjHandler {
    campaigns: Arc<dyn CampaignRepository>,
    pjs: Arc<dyn PjRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl CreatePjHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        pjs: Arc<dyn PjRepository>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            campaigns,
            pjs,
            ids,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePjCommand,
        metadata: CommandMetadata,
    ) -> Result<CreatePjResult, CampaignError> {
        let mut campaign = self
            .campaigns
            .find_by_id(&cmd.campaign_id)
            .await?
            .ok_or_else(|| CampaignError::CampaignNotFound(cmd.campaign_id.clone()))?;

        let (pj, event) = campaign.add_pj(&cmd.user_id, cmd.params, self.ids.as_ref())?;

        self.pjs.save(&pj, &[]).await?;
        self.campaigns
            .update(&campaign, &[metadata.stamp(event.to_envelope())])
            .await?;

        tracing::info!(
            campaign_id = %campaign.id(),
            pj_id = %pj.id(),
            pj_type = %pj.pj_type(),
            "pj created"
        );

        Ok(CreatePjResult { pj, event })
    }
}
