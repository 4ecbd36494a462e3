//! Session domain events.
//!
//! - `SessionCreated` - A master logged a play session
//! - `XpAssigned` - One XP award of that session, routed to the PJ

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, CampaignId, EventId, PjId, SessionId, Timestamp, UserId,
};
use crate::domain::progression::Xp;

pub const SESSION_CREATED: &str = "session_created";
pub const XP_ASSIGNED: &str = "xp_assigned";

// ════════════════════════════════════════════════════════════════════════════
// SessionCreated
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub campaign_id: CampaignId,
    /// Master of the campaign the session belongs to.
    pub master_id: UserId,
    pub summary: String,
    pub created_at: Timestamp,
}

domain_event!(
    SessionCreated,
    event_type = SESSION_CREATED,
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "session",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// XpAssigned
// ════════════════════════════════════════════════════════════════════════════

/// Published once per award. The worker credits `assigned_xp` to the PJ
/// named by the aggregate id.
///
/// `assigned_at` is the session's creation time, not the publish time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAssigned {
    pub event_id: EventId,
    pub pj_id: PjId,
    pub session_id: SessionId,
    pub campaign_id: CampaignId,
    pub assigned_xp: Xp,
    pub reason: String,
    pub assigned_at: Timestamp,
}

domain_event!(
    XpAssigned,
    event_type = XP_ASSIGNED,
    schema_version = 1,
    aggregate_id = pj_id,
    aggregate_type = "pj",
    occurred_at = assigned_at,
    event_id = event_id
);
