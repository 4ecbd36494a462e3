//! CreateCampaignHandler - Command handler for opening a campaign.

use std::sync::Arc;

use crate::domain::campaign::{Campaign, CampaignCreated, CampaignError};
use crate::domain::foundation::{CommandMetadata, SerializableDomainEvent};
use crate::ports::{CampaignRepository, IdGenerator};

/// Command to open a campaign. The acting user becomes its master.
#[derive(Debug, Clone)]
pub struct CreateCampaignCommand {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CreateCampaignResult {
    pub campaign: Campaign,
    pub event: CampaignCreated,
}

pub struct CreateCampaignHandler {
    repository: Arc<dyn CampaignRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl CreateCampaignHandler {
    pub fn new(repository: Arc<dyn CampaignRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    pub async fn handle(
        &self,
        cmd: CreateCampaignCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateCampaignResult, CampaignError> {
        let (campaign, event) =
            Campaign::new(metadata.user_id.clone(), cmd.name, self.ids.as_ref())?;

        self.repository
            .save(&campaign, &[metadata.stamp(event.to_envelope())])
            .await?;

        tracing::info!(campaign_id = %campaign.id(), master_id = %campaign.master_id(), "campaign created");

        Ok(CreateCampaignResult { campaign, event })
    }
}
