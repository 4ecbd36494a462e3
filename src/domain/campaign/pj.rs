//! PJ (player character) aggregate.
//!
//! A PJ owns its stat snapshots and three XP pools. XP arrives through
//! [`Pj::consume_xp`] and is spent through [`Pj::update_stats`], which
//! validates the whole update before touching any state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::events::{StatsUpdated, XpConsumed};
use super::{CampaignError, PjCreateParams};
use crate::domain::foundation::{CampaignId, EventId, PjId, Timestamp, UserId};
use crate::domain::progression::{BasicStats, SpecialStats, SupernaturalStats, Xp};

/// Whether a PJ has access to supernatural skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PjType {
    Human,
    Supernatural,
}

impl fmt::Display for PjType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PjType::Human => f.write_str("human"),
            PjType::Supernatural => f.write_str("supernatural"),
        }
    }
}

/// A player character.
///
/// # Invariants
///
/// - `supernatural_stats` is `Some` iff `pj_type` is `Supernatural`
/// - `spent_xp` equals the required XP of the current stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pj {
    id: PjId,
    campaign_id: CampaignId,
    user_id: UserId,

    name: String,
    weight: u32,
    height: u32,
    age: u32,
    look: u32,
    charisma: i32,
    villainy: u32,
    heroism: u32,
    pj_type: PjType,

    basic_stats: BasicStats,
    special_stats: SpecialStats,
    supernatural_stats: Option<SupernaturalStats>,

    /// Spendable pools.
    xp: Xp,

    /// Cached cost of the current stats.
    spent_xp: Xp,
}

impl Pj {
    /// A fresh PJ: zero stats, empty pools, talents from the creation params.
    pub(crate) fn new(
        id: PjId,
        campaign_id: CampaignId,
        user_id: UserId,
        params: PjCreateParams,
    ) -> Self {
        let talents = params.talents;
        let supernatural_stats = match params.pj_type {
            PjType::Supernatural => Some(SupernaturalStats::seed()),
            PjType::Human => None,
        };

        let mut pj = Self {
            id,
            campaign_id,
            user_id,
            name: params.name,
            weight: params.weight,
            height: params.height,
            age: params.age,
            look: params.look,
            charisma: params.charisma,
            villainy: params.villainy,
            heroism: params.heroism,
            pj_type: params.pj_type,
            basic_stats: BasicStats::untrained(
                talents.physical,
                talents.mental,
                talents.coordination,
            ),
            special_stats: SpecialStats::untrained(
                talents.physical_skills,
                talents.mental_skills,
                talents.energy_skills,
                talents.energy,
            ),
            supernatural_stats,
            xp: Xp::ZERO,
            spent_xp: Xp::ZERO,
        };
        pj.load_required_xp();
        pj
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PjId {
        &self.id
    }

    pub fn campaign_id(&self) -> &CampaignId {
        &self.campaign_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn look(&self) -> u32 {
        self.look
    }

    pub fn charisma(&self) -> i32 {
        self.charisma
    }

    pub fn villainy(&self) -> u32 {
        self.villainy
    }

    pub fn heroism(&self) -> u32 {
        self.heroism
    }

    pub fn pj_type(&self) -> PjType {
        self.pj_type
    }

    pub fn basic_stats(&self) -> &BasicStats {
        &self.basic_stats
    }

    pub fn special_stats(&self) -> &SpecialStats {
        &self.special_stats
    }

    pub fn supernatural_stats(&self) -> Option<&SupernaturalStats> {
        self.supernatural_stats.as_ref()
    }

    /// Spendable XP pools.
    pub fn xp(&self) -> Xp {
        self.xp
    }

    /// XP invested in the current stats.
    pub fn spent_xp(&self) -> Xp {
        self.spent_xp
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Credits awarded XP to the pools.
    ///
    /// Not idempotent: applying the same award twice credits it twice.
    /// Duplicate deliveries must be filtered before reaching this call.
    pub fn consume_xp(&mut self, amount: Xp) -> XpConsumed {
        self.xp = self.xp.credit(&amount);

        XpConsumed {
            event_id: EventId::new(),
            pj_id: self.id.clone(),
            consumed_xp: amount,
            consumed_at: Timestamp::now(),
        }
    }

    /// Replaces the stat snapshots, paying the cost difference from the pools.
    ///
    /// Talent flags on the incoming snapshots are ignored; the PJ keeps the
    /// talents it was created with.
    ///
    /// # Errors
    ///
    /// - `CannotReduceStats` if any single value went down
    /// - `InsufficientXp` if a pool cannot pay for its group
    /// - `SupernaturalStatsRequired` if a supernatural PJ sends none
    /// - `CannotUpdateSupernaturalStats` if a human PJ sends some
    pub fn update_stats(
        &mut self,
        basic: BasicStats,
        special: SpecialStats,
        supernatural: Option<SupernaturalStats>,
    ) -> Result<StatsUpdated, CampaignError> {
        let basic = basic.with_talents_from(&self.basic_stats);
        if self.basic_stats.is_higher_than(&basic) {
            return Err(CampaignError::CannotReduceStats);
        }
        let basic_spent = cost_increase(self.basic_stats.required_xp(), basic.required_xp())?;
        let basic_left = pay("basic", basic_spent, self.xp.basic)?;

        let special = special.with_talents_from(&self.special_stats);
        if self.special_stats.is_higher_than(&special) {
            return Err(CampaignError::CannotReduceStats);
        }
        let special_spent =
            cost_increase(self.special_stats.required_xp(), special.required_xp())?;
        let special_left = pay("special", special_spent, self.xp.special)?;

        let (supernatural, supernatural_spent, supernatural_left) = match (self.pj_type, supernatural) {
            (PjType::Supernatural, None) => {
                return Err(CampaignError::SupernaturalStatsRequired);
            }
            (PjType::Human, Some(_)) => {
                return Err(CampaignError::CannotUpdateSupernaturalStats);
            }
            (PjType::Human, None) => (None, 0, self.xp.supernatural),
            (PjType::Supernatural, Some(candidate)) => {
                let current = self.supernatural_stats.clone().unwrap_or_default();
                if current.is_higher_than(&candidate) {
                    return Err(CampaignError::CannotReduceStats);
                }
                let spent = cost_increase(current.required_xp(), candidate.required_xp())?;
                let left = pay("supernatural", spent, self.xp.supernatural)?;
                (Some(candidate), spent, left)
            }
        };

        let spent_xp = Xp::new(basic_spent, special_spent, supernatural_spent);

        let event = StatsUpdated {
            event_id: EventId::new(),
            pj_id: self.id.clone(),
            spent_xp,
            previous_basic_stats: self.basic_stats,
            previous_special_stats: self.special_stats,
            previous_supernatural_stats: self.supernatural_stats.clone(),
            basic_stats: basic,
            special_stats: special,
            supernatural_stats: supernatural.clone(),
            updated_at: Timestamp::now(),
        };

        self.basic_stats = basic;
        self.special_stats = special;
        if supernatural.is_some() {
            self.supernatural_stats = supernatural;
        }
        self.xp = Xp::new(basic_left, special_left, supernatural_left);
        self.load_required_xp();

        Ok(event)
    }

    /// Recomputes `spent_xp` from the current stats.
    pub fn load_required_xp(&mut self) {
        self.spent_xp = Xp {
            basic: self.basic_stats.required_xp(),
            special: self.special_stats.required_xp(),
            supernatural: self
                .supernatural_stats
                .as_ref()
                .map(SupernaturalStats::required_xp)
                .unwrap_or(0),
        };
    }
}

fn cost_increase(current: u64, candidate: u64) -> Result<u64, CampaignError> {
    // only reachable if a snapshot got cheaper without any single value dropping
    candidate
        .checked_sub(current)
        .ok_or(CampaignError::CannotReduceStats)
}

/// Returns what is left in the pool after paying `required`.
fn pay(pool: &'static str, required: u64, available: u64) -> Result<u64, CampaignError> {
    available
        .checked_sub(required)
        .ok_or_else(|| CampaignError::insufficient_xp(pool, required, available))
}

#[cfg(test)]
pub(crate) fn test_pj(pj_type: PjType) -> Pj {
    Pj::new(
        PjId::new("pj-1").unwrap(),
        CampaignId::new("camp-1").unwrap(),
        UserId::new("player-1").unwrap(),
        super::params::sample_params(pj_type),
    )
}
