//! CreateSessionHandler - Command handler for logging a play session.

use std::sync::Arc;

use crate::domain::foundation::{
    CampaignId, CommandMetadata, EventEnvelope, SerializableDomainEvent,
};
use crate::domain::session::{Session, SessionCreated, SessionError, XpAssignation, XpAssigned};
use crate::ports::{CampaignRepository, IdGenerator, SessionRepository};

/// Command to create a session with its XP awards.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub campaign_id: CampaignId,
    pub summary: String,
    pub xp_assignations: Vec<XpAssignation>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
    pub event: SessionCreated,
    pub xp_assigned: Vec<XpAssigned>,
}

/// Handler for creating sessions.
///
/// The awards are not applied here. Each becomes an `xp_assigned` event that
/// the worker later credits to its PJ. The events are saved with the
/// session, so a stored session always carries its awards.
pub struct CreateSessionHandler {
    campaigns: Arc<dyn CampaignRepository>,
    repository: Arc<dyn SessionRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl CreateSessionHandler {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        repository: Arc<dyn SessionRepository>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            campaigns,
            repository,
            ids,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, SessionError> {
        // 1. Every awarded PJ must belong to the campaign
        let campaign = self
            .campaigns
            .find_by_id(&cmd.campaign_id)
            .await?
            .ok_or_else(|| SessionError::campaign_not_found(cmd.campaign_id.clone()))?;

        let awarded: Vec<_> = cmd.xp_assignations.iter().map(|a| a.pj_id.clone()).collect();
        campaign.must_contain_pjs(&awarded)?;

        // 2. Create session aggregate
        let creation = Session::new(
            campaign.master_id().clone(),
            cmd.campaign_id,
            cmd.summary,
            cmd.xp_assignations,
            self.ids.as_ref(),
        )?;

        // 3. session_created followed by one xp_assigned per award
        let envelopes: Vec<EventEnvelope> = std::iter::once(creation.created.to_envelope())
            .chain(creation.xp_assigned.iter().map(|e| e.to_envelope()))
            .map(|envelope| metadata.stamp(envelope))
            .collect();

        // 4. Persist session and events together
        self.repository.save(&creation.session, &envelopes).await?;

        tracing::info!(
            session_id = %creation.session.id(),
            campaign_id = %creation.session.campaign_id(),
            awards = creation.xp_assigned.len(),
            "session created"
        );

        Ok(CreateSessionResult {
            session: creation.session,
            event: creation.created,
            xp_assigned: creation.xp_assigned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::OutboxPublisher;
    use crate::adapters::memory::{InMemorySessionRepository, SequentialIdGenerator};
    use crate::application::handlers::test_support::{
        FlakyPublisher, MockCampaignRepository, MockSessionRepository,
    };
    use crate::domain::campaign::{sample_params, Campaign, PjType};
    use crate::domain::foundation::{PjId, UserId};
    use crate::domain::progression::Xp;
    use crate::domain::session::events::{SESSION_CREATED, XP_ASSIGNED};
    use crate::domain::user::{User, UserRole};

    /// A campaign with one PJ per given player id.
    fn campaign_with_pjs(players: &[&str]) -> (Campaign, Vec<PjId>) {
        let ids = SequentialIdGenerator::new("c");
        let (mut campaign, _) = Campaign::new(UserId::new("gm").unwrap(), "Ashes", &ids).unwrap();
        let mut pj_ids = Vec::new();
        for player in players {
            let user = User::new(UserId::new(*player).unwrap(), *player, UserRole::Player).unwrap();
            campaign.invite_user(&user, &ids).unwrap();
            let (pj, _) = campaign
                .add_pj(user.id(), sample_params(PjType::Human), &ids)
                .unwrap();
            pj_ids.push(pj.id().clone());
        }
        (campaign, pj_ids)
    }

    struct Fixture {
        sessions: Arc<MockSessionRepository>,
        handler: CreateSessionHandler,
        campaign_id: CampaignId,
        pj_ids: Vec<PjId>,
    }

    fn fixture_with(sessions: MockSessionRepository) -> Fixture {
        let (campaign, pj_ids) = campaign_with_pjs(&["p1", "p2"]);
        let campaign_id = campaign.id().clone();
        let sessions = Arc::new(sessions);
        let handler = CreateSessionHandler::new(
            Arc::new(MockCampaignRepository::with(campaign)),
            sessions.clone(),
            Arc::new(SequentialIdGenerator::new("sess")),
        );
        Fixture {
            sessions,
            handler,
            campaign_id,
            pj_ids,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockSessionRepository::new())
    }

    fn command(f: &Fixture, awards: Vec<XpAssignation>) -> CreateSessionCommand {
        CreateSessionCommand {
            campaign_id: f.campaign_id.clone(),
            summary: "Crossed the Ashen Pass".to_string(),
            xp_assignations: awards,
        }
    }

    fn award(pj_id: &PjId, basic: u64) -> XpAssignation {
        XpAssignation::new(pj_id.clone(), Xp::new(basic, 0, 0), "survived")
    }

    #[tokio::test]
    async fn creates_and_saves_session() {
        let f = fixture();
        let awards = vec![award(&f.pj_ids[0], 10)];

        let result = f
            .handler
            .handle(command(&f, awards.clone()), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.session.id().as_str(), "sess-1");
        assert_eq!(result.session.xp_assignations(), awards.as_slice());
        assert_eq!(f.sessions.saved_sessions().len(), 1);
        assert_eq!(result.event.master_id.as_str(), "gm");
    }

    #[tokio::test]
    async fn saves_session_created_then_one_xp_assigned_per_award() {
        let f = fixture();
        let awards = vec![award(&f.pj_ids[0], 10), award(&f.pj_ids[1], 20)];

        f.handler
            .handle(command(&f, awards), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(
            f.sessions.events.types(),
            vec![SESSION_CREATED, XP_ASSIGNED, XP_ASSIGNED]
        );
        let events = f.sessions.events.all();
        assert_eq!(events[1].aggregate_id, f.pj_ids[0].as_str());
        assert_eq!(events[2].aggregate_id, f.pj_ids[1].as_str());
        assert_eq!(events[2].payload["assigned_xp"]["basic"], 20);
    }

    #[tokio::test]
    async fn session_without_awards_records_only_created() {
        let f = fixture();

        f.handler
            .handle(command(&f, vec![]), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(f.sessions.events.types(), vec![SESSION_CREATED]);
    }

    #[tokio::test]
    async fn includes_correlation_id_in_every_event() {
        let f = fixture();

        f.handler
            .handle(
                command(&f, vec![award(&f.pj_ids[0], 1)]),
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        for event in f.sessions.events.all() {
            assert_eq!(
                event.metadata.correlation_id.as_deref(),
                Some("test-correlation-id")
            );
        }
    }

    #[tokio::test]
    async fn foreign_pj_rejects_the_whole_session() {
        let f = fixture();
        let stranger = PjId::new("pj-elsewhere").unwrap();

        let result = f
            .handler
            .handle(
                command(&f, vec![award(&f.pj_ids[0], 10), award(&stranger, 10)]),
                CommandMetadata::test_fixture(),
            )
            .await;

        assert_eq!(result.unwrap_err(), SessionError::PjsNotInCampaign(vec![stranger]));
        assert!(f.sessions.saved_sessions().is_empty());
        assert!(f.sessions.events.all().is_empty());
    }

    #[tokio::test]
    async fn unknown_campaign_is_reported() {
        let f = fixture();
        let mut cmd = command(&f, vec![]);
        cmd.campaign_id = CampaignId::new("nowhere").unwrap();

        let result = f.handler.handle(cmd, CommandMetadata::test_fixture()).await;

        assert!(matches!(result, Err(SessionError::CampaignNotFound(_))));
    }

    #[tokio::test]
    async fn save_failure_records_no_event() {
        let f = fixture_with(MockSessionRepository::failing());

        let result = f
            .handler
            .handle(
                command(&f, vec![award(&f.pj_ids[0], 10)]),
                CommandMetadata::test_fixture(),
            )
            .await;

        assert!(matches!(result, Err(SessionError::Infrastructure(_))));
        assert!(f.sessions.events.all().is_empty());
    }

    #[tokio::test]
    async fn queue_outage_delays_the_awards_but_never_loses_them() {
        let (campaign, pj_ids) = campaign_with_pjs(&["p1"]);
        let campaign_id = campaign.id().clone();
        let sessions = Arc::new(InMemorySessionRepository::new());
        let handler = CreateSessionHandler::new(
            Arc::new(MockCampaignRepository::with(campaign)),
            sessions.clone(),
            Arc::new(SequentialIdGenerator::new("sess")),
        );
        let queue = Arc::new(FlakyPublisher::failing_first(1));
        let relay = OutboxPublisher::new(sessions.outbox(), queue.clone());

        handler
            .handle(
                CreateSessionCommand {
                    campaign_id: campaign_id.clone(),
                    summary: "Crossed the Ashen Pass".to_string(),
                    xp_assignations: vec![award(&pj_ids[0], 10)],
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(relay.poll_once().await.unwrap(), 0);
        assert_eq!(sessions.find_by_campaign(&campaign_id).await.unwrap().len(), 1);
        let waiting: Vec<String> = sessions
            .outbox()
            .pending_events()
            .await
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(waiting, vec![SESSION_CREATED, XP_ASSIGNED]);

        assert_eq!(relay.poll_once().await.unwrap(), 2);
        let awards = queue.bus.events_of_type(XP_ASSIGNED);
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0].aggregate_id, pj_ids[0].as_str());
    }
}
