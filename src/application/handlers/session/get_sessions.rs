//! GetSessionsHandler - Query handler listing the sessions of a campaign.

use std::sync::Arc;

use crate::domain::foundation::CampaignId;
use crate::domain::session::{Session, SessionError};
use crate::ports::{CampaignRepository, SessionRepository};

#[derive(Debug, Clone)]
pub struct GetSessionsQuery {
    pub campaign_id: CampaignId,
}

pub struct GetSessionsHandler {
    campaigns: Arc<dyn CampaignRepository>,
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionsHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            campaigns,
            repository,
        }
    }

    /// Sessions of the campaign, oldest first.
    pub async fn handle(&self, query: GetSessionsQuery) -> Result<Vec<Session>, SessionError> {
        if self.campaigns.find_by_id(&query.campaign_id).await?.is_none() {
            return Err(SessionError::campaign_not_found(query.campaign_id));
        }

        let mut sessions = self.repository.find_by_campaign(&query.campaign_id).await?;
        sessions.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::SequentialIdGenerator;
    use crate::application::handlers::test_support::{
        MockCampaignRepository, MockSessionRepository,
    };
    use crate::domain::campaign::Campaign;
    use crate::domain::foundation::{ErrorCode, UserId};

    fn session(campaign_id: &CampaignId, summary: &str, ids: &SequentialIdGenerator) -> Session {
        Session::new(
            UserId::new("gm").unwrap(),
            campaign_id.clone(),
            summary,
            vec![],
            ids,
        )
        .unwrap()
        .session
    }

    #[tokio::test]
    async fn lists_only_the_campaign_sessions() {
        let ids = SequentialIdGenerator::new("id");
        let (campaign, _) = Campaign::new(UserId::new("gm").unwrap(), "Ashes", &ids).unwrap();
        let other = CampaignId::new("elsewhere").unwrap();
        let sessions = MockSessionRepository::with_all(vec![
            session(campaign.id(), "first", &ids),
            session(&other, "unrelated", &ids),
            session(campaign.id(), "second", &ids),
        ]);
        let campaign_id = campaign.id().clone();
        let handler = GetSessionsHandler::new(
            Arc::new(MockCampaignRepository::with(campaign)),
            Arc::new(sessions),
        );

        let found = handler.handle(GetSessionsQuery { campaign_id }).await.unwrap();

        let summaries: Vec<&str> = found.iter().map(|s| s.summary()).collect();
        assert_eq!(summaries, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn unknown_campaign_is_reported() {
        let handler = GetSessionsHandler::new(
            Arc::new(MockCampaignRepository::new()),
            Arc::new(MockSessionRepository::new()),
        );

        let err = handler
            .handle(GetSessionsQuery {
                campaign_id: CampaignId::new("nope").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::CampaignNotFound);
    }
}
