//! Experience-cost formula and game-balance constants.
//!
//! Stats are bought in tiers of `level_step` points. The per-point price starts
//! at `first_level_cost` and rises by one each completed tier; a partial tier
//! is charged at the price of the tier being filled.
//!
//! All arithmetic saturates at `u64::MAX`.

/// Points per tier for physical, mental and coordination stats.
pub const BASIC_LEVEL_STEP: u64 = 10;

/// Points per tier for the special skill groups.
pub const SPECIAL_LEVEL_STEP: u64 = 100;

/// Points per tier for a supernatural skill.
pub const SUPERNATURAL_LEVEL_STEP: u64 = 100;

/// First-tier price of a basic group when the PJ is talented in it.
pub const BASIC_TALENTED_FIRST_LEVEL_COST: u64 = 1;

/// First-tier price of a basic group without talent.
pub const BASIC_UNTALENTED_FIRST_LEVEL_COST: u64 = 3;

/// First-tier price of a special group when the PJ is talented in it.
pub const SPECIAL_TALENTED_FIRST_LEVEL_COST: u64 = 1;

/// First-tier price of a special group without talent.
pub const SPECIAL_UNTALENTED_FIRST_LEVEL_COST: u64 = 2;

/// First-tier price of every supernatural skill.
pub const SUPERNATURAL_FIRST_LEVEL_COST: u64 = 1;

/// Flat price of one life point.
pub const LIFE_COST: u64 = 5;

/// Flat price of one energy tank point.
pub const ENERGY_TANK_COST: u64 = 10;

/// Flat price of one energy tank point for energy-talented PJs.
pub const ENERGY_TANK_TALENTED_COST: u64 = 5;

/// Experience required to raise a single stat from zero to `stat`.
///
/// `first_level_cost` must be at least 1.
pub fn stat_required_xp(stat: u64, level_step: u64, first_level_cost: u64) -> u64 {
    debug_assert!(level_step > 0, "level step must be positive");
    debug_assert!(first_level_cost > 0, "first level cost must be positive");

    let complete_levels = stat / level_step;
    let remainder = stat % level_step;

    let n = complete_levels.saturating_add(first_level_cost).saturating_sub(1);
    let tier_cost = triangular(n).saturating_mul(level_step);
    let skipped_tiers = triangular(first_level_cost.saturating_sub(1)).saturating_mul(level_step);

    let remainder_cost = complete_levels
        .saturating_add(first_level_cost)
        .saturating_mul(remainder);

    tier_cost
        .saturating_sub(skipped_tiers)
        .saturating_add(remainder_cost)
}

/// Sums [`stat_required_xp`] over every stat of a group.
pub fn group_required_xp<I>(stats: I, level_step: u64, first_level_cost: u64) -> u64
where
    I: IntoIterator<Item = u64>,
{
    stats.into_iter().fold(0u64, |total, stat| {
        total.saturating_add(stat_required_xp(stat, level_step, first_level_cost))
    })
}

/// First-tier price of a basic group.
pub fn basic_first_level_cost(is_talented: bool) -> u64 {
    if is_talented {
        BASIC_TALENTED_FIRST_LEVEL_COST
    } else {
        BASIC_UNTALENTED_FIRST_LEVEL_COST
    }
}

/// First-tier price of a special group.
pub fn special_first_level_cost(is_talented: bool) -> u64 {
    if is_talented {
        SPECIAL_TALENTED_FIRST_LEVEL_COST
    } else {
        SPECIAL_UNTALENTED_FIRST_LEVEL_COST
    }
}

/// Per-point price of the energy tank.
pub fn energy_tank_cost(is_energy_talented: bool) -> u64 {
    if is_energy_talented {
        ENERGY_TANK_TALENTED_COST
    } else {
        ENERGY_TANK_COST
    }
}

fn triangular(n: u64) -> u64 {
    // halve the even factor before multiplying
    if n % 2 == 0 {
        (n / 2).saturating_mul(n.saturating_add(1))
    } else {
        n.saturating_mul(n.saturating_add(1) / 2)
    }
}
