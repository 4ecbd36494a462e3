//! In-memory repositories.
//!
//! Each repository clones aggregates in and out, so callers never share
//! state with the store. A write lock is held for the whole of `save` and
//! `update`, which serializes concurrent writes to the same aggregate and
//! makes the outbox entries land together with the aggregate.
//!
//! Repositories built with `new()` get an outbox of their own. Pass one
//! shared `InMemoryOutbox` through `with_outbox` to relay every event from a
//! single `OutboxPublisher`.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::InMemoryOutbox;
use crate::domain::campaign::{Campaign, Pj};
use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, EventEnvelope, PjId, SessionId, UserId,
};
use crate::domain::session::Session;
use crate::domain::user::User;
use crate::ports::{
    CampaignRepository, OutboxWriter, PjRepository, SessionRepository, UserRepository,
};

// ════════════════════════════════════════════════════════════════════════════
// Campaigns
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryCampaignRepository {
    campaigns: RwLock<HashMap<CampaignId, Campaign>>,
    outbox: Arc<InMemoryOutbox>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outbox(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            campaigns: RwLock::default(),
            outbox,
        }
    }

    pub fn outbox(&self) -> Arc<InMemoryOutbox> {
        self.outbox.clone()
    }

    async fn matching(&self, keep: impl Fn(&Campaign) -> bool) -> Vec<Campaign> {
        let mut found: Vec<Campaign> = self
            .campaigns
            .read()
            .await
            .values()
            .filter(|c| keep(c))
            .cloned()
            .collect();
        found.sort_by_key(|c| (Reverse(*c.created_at()), c.id().as_str().to_string()));
        found
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn save(&self, campaign: &Campaign, events: &[EventEnvelope]) -> Result<(), DomainError> {
        let mut campaigns = self.campaigns.write().await;
        self.outbox.write_batch(events, campaign.id().as_str()).await?;
        campaigns.insert(campaign.id().clone(), campaign.clone());
        Ok(())
    }

    async fn update(&self, campaign: &Campaign, events: &[EventEnvelope]) -> Result<(), DomainError> {
        let mut campaigns = self.campaigns.write().await;
        let Some(stored) = campaigns.get_mut(campaign.id()) else {
            return Err(DomainError::new(
                ErrorCode::CampaignNotFound,
                format!("Campaign not found: {}", campaign.id()),
            ));
        };
        self.outbox.write_batch(events, campaign.id().as_str()).await?;
        *stored = campaign.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &CampaignId) -> Result<Option<Campaign>, DomainError> {
        Ok(self.campaigns.read().await.get(id).cloned())
    }

    async fn find_by_master(&self, master_id: &UserId) -> Result<Vec<Campaign>, DomainError> {
        Ok(self.matching(|c| c.master_id() == master_id).await)
    }

    async fn find_by_player(&self, user_id: &UserId) -> Result<Vec<Campaign>, DomainError> {
        Ok(self
            .matching(|c| c.invitations().iter().any(|i| i.user_id() == user_id))
            .await)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PJs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryPjRepository {
    pjs: RwLock<HashMap<PjId, Pj>>,
    outbox: Arc<InMemoryOutbox>,
}

impl InMemoryPjRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outbox(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            pjs: RwLock::default(),
            outbox,
        }
    }

    pub fn outbox(&self) -> Arc<InMemoryOutbox> {
        self.outbox.clone()
    }
}

#[async_trait]
impl PjRepository for InMemoryPjRepository {
    async fn save(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError> {
        let mut pjs = self.pjs.write().await;
        self.outbox.write_batch(events, pj.id().as_str()).await?;
        pjs.insert(pj.id().clone(), pj.clone());
        Ok(())
    }

    async fn update(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError> {
        let mut pjs = self.pjs.write().await;
        let Some(stored) = pjs.get_mut(pj.id()) else {
            return Err(DomainError::new(
                ErrorCode::PjNotFound,
                format!("PJ not found: {}", pj.id()),
            ));
        };
        self.outbox.write_batch(events, pj.id().as_str()).await?;
        *stored = pj.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &PjId) -> Result<Option<Pj>, DomainError> {
        Ok(self.pjs.read().await.get(id).cloned())
    }

    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Pj>, DomainError> {
        let mut pjs: Vec<Pj> = self
            .pjs
            .read()
            .await
            .values()
            .filter(|pj| pj.campaign_id() == campaign_id)
            .cloned()
            .collect();
        pjs.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        Ok(pjs)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

/// Sessions are kept in insertion order.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<Vec<Session>>,
    outbox: Arc<InMemoryOutbox>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outbox(outbox: Arc<InMemoryOutbox>) -> Self {
        Self {
            sessions: RwLock::default(),
            outbox,
        }
    }

    pub fn outbox(&self) -> Arc<InMemoryOutbox> {
        self.outbox.clone()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session, events: &[EventEnvelope]) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        self.outbox.write_batch(events, session.id().as_str()).await?;
        sessions.push(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Session>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .iter()
            .filter(|s| s.campaign_id() == campaign_id)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.users.write().await.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }
}
