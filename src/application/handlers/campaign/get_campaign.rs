//! GetCampaignHandler - Query handler for reading one campaign.

use std::sync::Arc;

use crate::domain::campaign::{Campaign, CampaignError};
use crate::domain::foundation::CampaignId;
use crate::ports::CampaignRepository;

#[derive(Debug, Clone)]
pub struct GetCampaignQuery {
    pub campaign_id: CampaignId,
}

pub struct GetCampaignHandler {
    repository: Arc<dyn CampaignRepository>,
}

impl GetCampaignHandler {
    pub fn new(repository: Arc<dyn CampaignRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetCampaignQuery) -> Result<Campaign, CampaignError> {
        self.repository
            .find_by_id(&query.campaign_id)
            .await?
            .ok_or(CampaignError::CampaignNotFound(query.campaign_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::SequentialIdGenerator;
    use crate::application::handlers::test_support::MockCampaignRepository;
    use crate::domain::foundation::{ErrorCode, UserId};

    #[tokio::test]
    async fn returns_the_stored_campaign() {
        let ids = SequentialIdGenerator::new("c");
        let (campaign, _) = Campaign::new(UserId::new("gm").unwrap(), "Ashes", &ids).unwrap();
        let handler = GetCampaignHandler::new(Arc::new(MockCampaignRepository::with(
            campaign.clone(),
        )));

        let found = handler
            .handle(GetCampaignQuery {
                campaign_id: campaign.id().clone(),
            })
            .await
            .unwrap();

        assert_eq!(found, campaign);
    }

    #[tokio::test]
    async fn missing_campaign_is_not_found() {
        let handler = GetCampaignHandler::new(Arc::new(MockCampaignRepository::new()));

        let err = handler
            .handle(GetCampaignQuery {
                campaign_id: CampaignId::new("nope").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::CampaignNotFound);
    }
}
