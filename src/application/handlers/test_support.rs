//! Hand-written port mocks shared by the handler tests.
//!
//! The write mocks keep every envelope handed to `save`/`update`, which is
//! what the handler put in the outbox.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::adapters::events::InMemoryEventBus;

use crate::domain::campaign::{Campaign, Pj};
use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, EventEnvelope, PjId, SessionId, UserId,
};
use crate::domain::session::Session;
use crate::domain::user::User;
use crate::ports::{
    CampaignRepository, EventPublisher, PjRepository, SessionRepository, UserRepository,
};

fn save_failure() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "Simulated save failure")
}

/// Envelopes recorded alongside the aggregates.
#[derive(Default)]
pub struct RecordedEvents(Mutex<Vec<EventEnvelope>>);

impl RecordedEvents {
    fn record(&self, events: &[EventEnvelope]) {
        self.0.lock().unwrap().extend_from_slice(events);
    }

    pub fn all(&self) -> Vec<EventEnvelope> {
        self.0.lock().unwrap().clone()
    }

    pub fn types(&self) -> Vec<String> {
        self.all().into_iter().map(|e| e.event_type).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Campaigns
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockCampaignRepository {
    campaigns: Mutex<Vec<Campaign>>,
    pub events: RecordedEvents,
    fail_writes: bool,
}

impl MockCampaignRepository {
    pub fn new() -> Self {
        Self {
            campaigns: Mutex::new(Vec::new()),
            events: RecordedEvents::default(),
            fail_writes: false,
        }
    }

    pub fn with(campaign: Campaign) -> Self {
        Self::with_all(vec![campaign])
    }

    pub fn with_all(campaigns: Vec<Campaign>) -> Self {
        let repo = Self::new();
        *repo.campaigns.lock().unwrap() = campaigns;
        repo
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// Reads succeed, `save` and `update` fail.
    pub fn failing_with(campaign: Campaign) -> Self {
        Self {
            fail_writes: true,
            ..Self::with(campaign)
        }
    }

    pub fn stored(&self) -> Vec<Campaign> {
        self.campaigns.lock().unwrap().clone()
    }
}

#[async_trait]
impl CampaignRepository for MockCampaignRepository {
    async fn save(&self, campaign: &Campaign, events: &[EventEnvelope]) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(save_failure());
        }
        self.campaigns.lock().unwrap().push(campaign.clone());
        self.events.record(events);
        Ok(())
    }

    async fn update(&self, campaign: &Campaign, events: &[EventEnvelope]) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(save_failure());
        }
        let mut campaigns = self.campaigns.lock().unwrap();
        campaigns.retain(|c| c.id() != campaign.id());
        campaigns.push(campaign.clone());
        self.events.record(events);
        Ok(())
    }

    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn find_by_master(&self, master_id: &UserId) -> Result<Vec<Campaign>, DomainError> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.master_id() == master_id)
            .cloned()
            .collect())
    }

    async fn find_by_player(&self, user_id: &UserId) -> Result<Vec<Campaign>, DomainError> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.invitations().iter().any(|i| i.user_id() == user_id))
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PJs
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockPjRepository {
    pjs: Mutex<Vec<Pj>>,
    pub events: RecordedEvents,
    fail_writes: bool,
}

impl MockPjRepository {
    pub fn new() -> Self {
        Self {
            pjs: Mutex::new(Vec::new()),
            events: RecordedEvents::default(),
            fail_writes: false,
        }
    }

    pub fn with(pj: Pj) -> Self {
        let repo = Self::new();
        repo.pjs.lock().unwrap().push(pj);
        repo
    }

    pub fn failing_with(pj: Pj) -> Self {
        Self {
            fail_writes: true,
            ..Self::with(pj)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn stored(&self) -> Vec<Pj> {
        self.pjs.lock().unwrap().clone()
    }
}

#[async_trait]
impl PjRepository for MockPjRepository {
    async fn save(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(save_failure());
        }
        self.pjs.lock().unwrap().push(pj.clone());
        self.events.record(events);
        Ok(())
    }

    async fn update(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(save_failure());
        }
        let mut pjs = self.pjs.lock().unwrap();
        pjs.retain(|p| p.id() != pj.id());
        pjs.push(pj.clone());
        self.events.record(events);
        Ok(())
    }

    async fn find_by_id(&self, id: &PjId) -> Result<Option<Pj>, DomainError> {
        Ok(self
            .pjs
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned())
    }

    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Pj>, DomainError> {
        Ok(self
            .pjs
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.campaign_id() == campaign_id)
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockSessionRepository {
    sessions: Mutex<Vec<Session>>,
    pub events: RecordedEvents,
    fail_save: bool,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            events: RecordedEvents::default(),
            fail_save: false,
        }
    }

    pub fn with_all(sessions: Vec<Session>) -> Self {
        let repo = Self::new();
        *repo.sessions.lock().unwrap() = sessions;
        repo
    }

    pub fn failing() -> Self {
        Self {
            fail_save: true,
            ..Self::new()
        }
    }

    pub fn saved_sessions(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn save(&self, session: &Session, events: &[EventEnvelope]) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(save_failure());
        }
        self.sessions.lock().unwrap().push(session.clone());
        self.events.record(events);
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.campaign_id() == campaign_id)
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockUserRepository {
    users: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Queue
// ─────────────────────────────────────────────────────────────────────────────

/// Fails the first `failures` publishes, then delegates to `bus`.
pub struct FlakyPublisher {
    failures: usize,
    calls: AtomicUsize,
    pub bus: InMemoryEventBus,
}

impl FlakyPublisher {
    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            bus: InMemoryEventBus::new(),
        }
    }
}

#[async_trait]
impl EventPublisher for FlakyPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
            return Err(DomainError::new(ErrorCode::QueueError, "Publish failed"));
        }
        self.bus.publish(event).await
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
