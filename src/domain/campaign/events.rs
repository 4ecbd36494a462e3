//! Campaign and PJ domain events.
//!
//! - `CampaignCreated` - A master opened a campaign
//! - `UserInvited` - A player was invited (aggregate: the user)
//! - `PjAdded` - An invited player created their PJ
//! - `XpConsumed` - XP was credited to a PJ's pools
//! - `StatsUpdated` - A PJ spent XP on stats (before/after audit trail)

use serde::{Deserialize, Serialize};

use super::PjType;
use crate::domain::foundation::{
    domain_event, CampaignId, EventId, InvitationId, PjId, Timestamp, UserId,
};
use crate::domain::progression::{BasicStats, SpecialStats, SupernaturalStats, Xp};

pub const CAMPAIGN_CREATED: &str = "campaign_created";
pub const USER_INVITED: &str = "user_invited";
pub const PJ_ADDED: &str = "pj_added";
pub const XP_CONSUMED: &str = "xp_consumed";
pub const STATS_UPDATED: &str = "stats_updated";

// ════════════════════════════════════════════════════════════════════════════
// CampaignCreated
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreated {
    pub event_id: EventId,
    pub campaign_id: CampaignId,
    pub master_id: UserId,
    pub name: String,
    pub created_at: Timestamp,
}

domain_event!(
    CampaignCreated,
    event_type = CAMPAIGN_CREATED,
    schema_version = 1,
    aggregate_id = campaign_id,
    aggregate_type = "campaign",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// UserInvited
// ════════════════════════════════════════════════════════════════════════════

/// Published when a player is invited. The aggregate is the invited user so
/// consumers can route per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInvited {
    pub event_id: EventId,
    pub invitation_id: InvitationId,
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub invited_at: Timestamp,
}

domain_event!(
    UserInvited,
    event_type = USER_INVITED,
    schema_version = 1,
    aggregate_id = user_id,
    aggregate_type = "user",
    occurred_at = invited_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// PjAdded
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjAdded {
    pub event_id: EventId,
    pub pj_id: PjId,
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub pj_type: PjType,
    pub added_at: Timestamp,
}

domain_event!(
    PjAdded,
    event_type = PJ_ADDED,
    schema_version = 1,
    aggregate_id = pj_id,
    aggregate_type = "pj",
    occurred_at = added_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// XpConsumed
// ════════════════════════════════════════════════════════════════════════════

/// Published when awarded XP lands in a PJ's spendable pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpConsumed {
    pub event_id: EventId,
    pub pj_id: PjId,
    /// Amounts added to each pool.
    pub consumed_xp: Xp,
    pub consumed_at: Timestamp,
}

domain_event!(
    XpConsumed,
    event_type = XP_CONSUMED,
    schema_version = 1,
    aggregate_id = pj_id,
    aggregate_type = "pj",
    occurred_at = consumed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// StatsUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a PJ buys stats. Carries both snapshots for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsUpdated {
    pub event_id: EventId,
    pub pj_id: PjId,

    /// XP debited from each pool.
    pub spent_xp: Xp,

    pub previous_basic_stats: BasicStats,
    pub previous_special_stats: SpecialStats,
    pub previous_supernatural_stats: Option<SupernaturalStats>,

    pub basic_stats: BasicStats,
    pub special_stats: SpecialStats,
    pub supernatural_stats: Option<SupernaturalStats>,

    pub updated_at: Timestamp,
}

domain_event!(
    StatsUpdated,
    event_type = STATS_UPDATED,
    schema_version = 1,
    aggregate_id = pj_id,
    aggregate_type = "pj",
    occurred_at = updated_at,
    event_id = event_id
);
