//! UpdatePjStatsHandler - Command handler for buying stats with XP.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Pj, StatsUpdated};
use crate::domain::foundation::{CommandMetadata, PjId, SerializableDomainEvent};
use crate::domain::progression::{BasicStats, SpecialStats, SupernaturalStats};
use crate::ports::PjRepository;

/// Full replacement of a PJ's stat snapshots.
///
/// `supernatural_stats` must be present for supernatural PJs and absent for
/// humans.
#[derive(Debug, Clone)]
pub struct UpdatePjStatsCommand {
    pub pj_id: PjId,
    pub basic_stats: BasicStats,
    pub special_stats: SpecialStats,
    pub supernatural_stats: Option<SupernaturalStats>,
}

#[derive(Debug, Clone)]
pub struct UpdatePjStatsResult {
    pub pj: Pj,
    pub event: StatsUpdated,
}

pub struct UpdatePjStatsHandler {
    repository: Arc<dyn PjRepository>,
}

impl UpdatePjStatsHandler {
    pub fn new(repository: Arc<dyn PjRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdatePjStatsCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdatePjStatsResult, CampaignError> {
        let mut pj = self
            .repository
            .find_by_id(&cmd.pj_id)
            .await?
            .ok_or_else(|| CampaignError::PjNotFound(cmd.pj_id.clone()))?;

        let event = pj
            .update_stats(cmd.basic_stats, cmd.special_stats, cmd.supernatural_stats)
            .map_err(|e| {
                tracing::debug!(pj_id = %cmd.pj_id, error = %e, "stat update rejected");
                e
            })?;

        self.repository
            .update(&pj, &[metadata.stamp(event.to_envelope())])
            .await?;

        tracing::info!(
            pj_id = %pj.id(),
            basic = event.spent_xp.basic,
            special = event.spent_xp.special,
            supernatural = event.spent_xp.supernatural,
            "stats updated"
        );

        Ok(UpdatePjStatsResult { pj, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockPjRepository;
    use crate::domain::campaign::events::STATS_UPDATED;
    use crate::domain::campaign::{test_pj, PjType};
    use crate::domain::progression::{Physical, Skill, Xp};

    fn funded_pj(pj_type: PjType) -> Pj {
        let mut pj = test_pj(pj_type);
        pj.consume_xp(Xp::new(500, 500, 500));
        pj
    }

    /// Physical raised to 10 strength. Talented physical costs 10 per point.
    fn command(pj: &Pj, supernatural_stats: Option<SupernaturalStats>) -> UpdatePjStatsCommand {
        let mut basic = *pj.basic_stats();
        basic.physical = Physical::new(10, 0, 0, 0, true);
        UpdatePjStatsCommand {
            pj_id: pj.id().clone(),
            basic_stats: basic,
            special_stats: *pj.special_stats(),
            supernatural_stats,
        }
    }

    #[tokio::test]
    async fn pays_from_pools_and_records_audit_event() {
        let pj = funded_pj(PjType::Human);
        let repo = Arc::new(MockPjRepository::with(pj.clone()));
        let handler = UpdatePjStatsHandler::new(repo.clone());

        let result = handler
            .handle(command(&pj, None), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let spent = result.event.spent_xp.basic;
        assert!(spent > 0);
        assert_eq!(result.pj.xp().basic, 500 - spent);
        assert_eq!(result.pj.spent_xp().basic, result.pj.basic_stats().required_xp());
        assert_eq!(repo.stored()[0].basic_stats().physical.strength, 10);
        assert_eq!(repo.events.types(), vec![STATS_UPDATED]);
    }

    #[tokio::test]
    async fn unknown_pj_is_reported() {
        let pj = funded_pj(PjType::Human);
        let handler = UpdatePjStatsHandler::new(Arc::new(MockPjRepository::new()));

        let result = handler
            .handle(command(&pj, None), CommandMetadata::test_fixture())
            .await;

        assert_eq!(result.unwrap_err(), CampaignError::PjNotFound(pj.id().clone()));
    }

    #[tokio::test]
    async fn rejected_update_leaves_stored_pj_untouched() {
        let pj = test_pj(PjType::Human);
        let repo = Arc::new(MockPjRepository::with(pj.clone()));
        let handler = UpdatePjStatsHandler::new(repo.clone());

        let result = handler
            .handle(command(&pj, None), CommandMetadata::test_fixture())
            .await;

        assert!(matches!(
            result,
            Err(CampaignError::InsufficientXp { pool: "basic", .. })
        ));
        assert_eq!(repo.stored(), vec![pj]);
        assert!(repo.events.all().is_empty());
    }

    #[tokio::test]
    async fn human_cannot_send_supernatural_stats() {
        let pj = funded_pj(PjType::Human);
        let handler = UpdatePjStatsHandler::new(Arc::new(MockPjRepository::with(pj.clone())));

        let result = handler
            .handle(
                command(&pj, Some(SupernaturalStats::seed())),
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), CampaignError::CannotUpdateSupernaturalStats);
    }

    #[tokio::test]
    async fn supernatural_pj_must_send_supernatural_stats() {
        let pj = funded_pj(PjType::Supernatural);
        let handler = UpdatePjStatsHandler::new(Arc::new(MockPjRepository::with(pj.clone())));

        let result = handler
            .handle(command(&pj, None), CommandMetadata::test_fixture())
            .await;

        assert_eq!(result.unwrap_err(), CampaignError::SupernaturalStatsRequired);
    }

    #[tokio::test]
    async fn supernatural_purchase_debits_its_own_pool() {
        let pj = funded_pj(PjType::Supernatural);
        let repo = Arc::new(MockPjRepository::with(pj.clone()));
        let handler = UpdatePjStatsHandler::new(repo);
        let raised = SupernaturalStats::new(vec![Skill::new(vec![5])]);

        let result = handler
            .handle(command(&pj, Some(raised.clone())), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let spent = raised.required_xp();
        assert_eq!(result.event.spent_xp.supernatural, spent);
        assert_eq!(result.pj.xp().supernatural, 500 - spent);
        assert_eq!(result.pj.supernatural_stats(), Some(&raised));
    }

    #[tokio::test]
    async fn save_failure_records_no_event() {
        let pj = funded_pj(PjType::Human);
        let repo = Arc::new(MockPjRepository::failing_with(pj.clone()));
        let handler = UpdatePjStatsHandler::new(repo.clone());

        let result = handler
            .handle(command(&pj, None), CommandMetadata::test_fixture())
            .await;

        assert!(matches!(result, Err(CampaignError::Infrastructure(_))));
        assert!(repo.events.all().is_empty());
    }
}
