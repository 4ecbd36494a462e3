//! Session aggregate.
//!
//! A session is the log of one play session and the XP it awards. It is
//! created once and never modified.
//!
//! # Ownership
//!
//! Sessions reference PJs by ID but do NOT own them. Awards reach the PJs
//! asynchronously through `XpAssigned` events.

use serde::{Deserialize, Serialize};

use super::events::{SessionCreated, XpAssigned};
use super::SessionError;
use crate::domain::foundation::{CampaignId, EventId, PjId, SessionId, Timestamp, UserId};
use crate::domain::progression::Xp;
use crate::ports::IdGenerator;

/// One XP award to one PJ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAssignation {
    pub pj_id: PjId,
    pub xp: Xp,
    pub reason: String,
}

impl XpAssignation {
    pub fn new(pj_id: PjId, xp: Xp, reason: impl Into<String>) -> Self {
        Self {
            pj_id,
            xp,
            reason: reason.into(),
        }
    }
}

/// Session aggregate - an immutable, append-only award log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    campaign_id: CampaignId,
    summary: String,
    xp_assignations: Vec<XpAssignation>,
    created_at: Timestamp,
}

/// A new session together with the events its creation produced.
#[derive(Debug, Clone)]
pub struct SessionCreation {
    pub session: Session,
    pub created: SessionCreated,
    /// One event per award, in award order.
    pub xp_assigned: Vec<XpAssigned>,
}

impl Session {
    /// Logs a session.
    ///
    /// The caller must already have checked that every awarded PJ belongs to
    /// the campaign (see `Campaign::must_contain_pjs`).
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the generated id is empty
    pub fn new(
        master_id: UserId,
        campaign_id: CampaignId,
        summary: impl Into<String>,
        xp_assignations: Vec<XpAssignation>,
        ids: &dyn IdGenerator,
    ) -> Result<SessionCreation, SessionError> {
        let session = Self {
            id: SessionId::new(ids.generate_id())?,
            campaign_id,
            summary: summary.into(),
            xp_assignations,
            created_at: Timestamp::now(),
        };

        let created = SessionCreated {
            event_id: EventId::new(),
            session_id: session.id.clone(),
            campaign_id: session.campaign_id.clone(),
            master_id,
            summary: session.summary.clone(),
            created_at: session.created_at,
        };

        let xp_assigned = session
            .xp_assignations
            .iter()
            .map(|award| XpAssigned {
                event_id: EventId::new(),
                pj_id: award.pj_id.clone(),
                session_id: session.id.clone(),
                campaign_id: session.campaign_id.clone(),
                assigned_xp: award.xp,
                reason: award.reason.clone(),
                assigned_at: session.created_at,
            })
            .collect();

        Ok(SessionCreation {
            session,
            created,
            xp_assigned,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn campaign_id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn xp_assignations(&self) -> &[XpAssignation] {
        &self.xp_assignations
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Ids of every awarded PJ, in award order.
    pub fn awarded_pj_ids(&self) -> Vec<PjId> {
        self.xp_assignations
            .iter()
            .map(|award| award.pj_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::SequentialIdGenerator;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    fn award(pj: &str, basic: u64) -> XpAssignation {
        XpAssignation::new(PjId::new(pj).unwrap(), Xp::new(basic, 5, 0), "boss fight")
    }

    fn create(awards: Vec<XpAssignation>) -> SessionCreation {
        Session::new(
            UserId::new("master-1").unwrap(),
            CampaignId::new("camp-1").unwrap(),
            "The party reached the tower",
            awards,
            &SequentialIdGenerator::new("sess"),
        )
        .unwrap()
    }

    #[test]
    fn stores_awards_verbatim() {
        let awards = vec![award("pj-1", 10), award("pj-2", 20)];
        let creation = create(awards.clone());

        assert_eq!(creation.session.xp_assignations(), awards.as_slice());
        assert_eq!(creation.session.id().as_str(), "sess-1");
        assert_eq!(
            creation.session.awarded_pj_ids(),
            vec![PjId::new("pj-1").unwrap(), PjId::new("pj-2").unwrap()]
        );
    }

    #[test]
    fn emits_one_xp_assigned_per_award() {
        let creation = create(vec![award("pj-1", 10), award("pj-2", 20)]);

        assert_eq!(creation.xp_assigned.len(), 2);
        assert_eq!(creation.xp_assigned[1].pj_id.as_str(), "pj-2");
        assert_eq!(creation.xp_assigned[1].assigned_xp, Xp::new(20, 5, 0));
        assert_ne!(
            creation.xp_assigned[0].event_id,
            creation.xp_assigned[1].event_id
        );
    }

    #[test]
    fn xp_assigned_occurs_at_session_creation() {
        let creation = create(vec![award("pj-1", 10)]);
        let event = &creation.xp_assigned[0];

        assert_eq!(event.occurred_at(), *creation.session.created_at());
        assert_eq!(creation.created.created_at, *creation.session.created_at());
    }

    #[test]
    fn xp_assigned_envelope_targets_the_pj() {
        let creation = create(vec![award("pj-7", 10)]);
        let envelope = creation.xp_assigned[0].to_envelope();

        assert_eq!(envelope.event_type, "xp_assigned");
        assert_eq!(envelope.aggregate_id, "pj-7");
        assert_eq!(envelope.aggregate_type, "pj");
        assert_eq!(envelope.payload["assigned_xp"]["basic"], 10);
        assert_eq!(envelope.payload["assigned_xp"]["special"], 5);
    }

    #[test]
    fn session_without_awards_only_emits_created() {
        let creation = create(Vec::new());
        assert!(creation.xp_assigned.is_empty());
        assert_eq!(creation.created.master_id.as_str(), "master-1");
    }
}
