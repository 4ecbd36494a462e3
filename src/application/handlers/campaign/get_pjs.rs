//! GetPjsHandler - Query handler listing the PJs of a campaign.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Pj};
use crate::domain::foundation::CampaignId;
use crate::ports::{CampaignRepository, PjRepository};

#[derive(Debug, Clone)]
pub struct GetPjsQuery {
    pub campaign_id: CampaignId,
}

/// Lists a campaign's PJs by id, each with its spent XP recomputed like
/// `GetPjHandler` does.
pub struct GetPjsHandler {
    campaigns: Arc<dyn CampaignRepository>,
    pjs: Arc<dyn PjRepository>,
}

impl GetPjsHandler {
    pub fn new(campaigns: Arc<dyn CampaignRepository>, pjs: Arc<dyn PjRepository>) -> Self {
        Self { campaigns, pjs }
    }

    pub async fn handle(&self, query: GetPjsQuery) -> Result<Vec<Pj>, CampaignError> {
        if self.campaigns.find_by_id(&query.campaign_id).await?.is_none() {
            return Err(CampaignError::CampaignNotFound(query.campaign_id));
        }

        let mut pjs = self.pjs.find_by_campaign(&query.campaign_id).await?;
        for pj in &mut pjs {
            pj.load_required_xp();
        }
        Ok(pjs)
    }
}
