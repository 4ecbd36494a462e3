//! GetCampaignsHandler - Query handler listing a user's campaigns.

use std::sync::Arc;

use crate::domain::campaign::{Campaign, CampaignError};
use crate::domain::foundation::UserId;
use crate::ports::CampaignRepository;

/// Which side of the table the listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignRole {
    /// Campaigns the user runs
    Master,
    /// Campaigns the user has been invited to
    Player,
}

#[derive(Debug, Clone)]
pub struct GetCampaignsQuery {
    pub user_id: UserId,
    pub role: CampaignRole,
}

/// Lists campaigns newest first.
pub struct GetCampaignsHandler {
    repository: Arc<dyn CampaignRepository>,
}

impl GetCampaignsHandler {
    pub fn new(repository: Arc<dyn CampaignRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetCampaignsQuery) -> Result<Vec<Campaign>, CampaignError> {
        let campaigns = match query.role {
            CampaignRole::Master => self.repository.find_by_master(&query.user_id).await?,
            CampaignRole::Player => self.repository.find_by_player(&query.user_id).await?,
        };
        Ok(campaigns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::SequentialIdGenerator;
    use crate::application::handlers::test_support::MockCampaignRepository;
    use crate::domain::user::{User, UserRole};

    fn names(campaigns: &[Campaign]) -> Vec<&str> {
        let mut names: Vec<&str> = campaigns.iter().map(|c| c.name()).collect();
        names.sort();
        names
    }

    fn handler() -> GetCampaignsHandler {
        let ids = SequentialIdGenerator::new("c");
        let gm = UserId::new("gm").unwrap();
        let player = User::new(UserId::new("p1").unwrap(), "p1", UserRole::Player).unwrap();
        let (mut ashes, _) = Campaign::new(gm.clone(), "Ashes", &ids).unwrap();
        let (embers, _) = Campaign::new(gm, "Embers", &ids).unwrap();
        let (mut frost, _) = Campaign::new(UserId::new("gm-2").unwrap(), "Frost", &ids).unwrap();
        ashes.invite_user(&player, &ids).unwrap();
        frost.invite_user(&player, &ids).unwrap();

        GetCampaignsHandler::new(Arc::new(MockCampaignRepository::with_all(vec![
            ashes, embers, frost,
        ])))
    }

    fn query(user: &str, role: CampaignRole) -> GetCampaignsQuery {
        GetCampaignsQuery {
            user_id: UserId::new(user).unwrap(),
            role,
        }
    }

    #[tokio::test]
    async fn master_sees_the_campaigns_they_run() {
        let found = handler()
            .handle(query("gm", CampaignRole::Master))
            .await
            .unwrap();

        assert_eq!(names(&found), vec!["Ashes", "Embers"]);
    }

    #[tokio::test]
    async fn player_sees_the_campaigns_they_were_invited_to() {
        let found = handler()
            .handle(query("p1", CampaignRole::Player))
            .await
            .unwrap();

        assert_eq!(names(&found), vec!["Ashes", "Frost"]);
    }

    #[tokio::test]
    async fn roles_do_not_mix() {
        let handler = handler();

        assert!(handler
            .handle(query("gm", CampaignRole::Player))
            .await
            .unwrap()
            .is_empty());
        assert!(handler
            .handle(query("p1", CampaignRole::Master))
            .await
            .unwrap()
            .is_empty());
    }
}
