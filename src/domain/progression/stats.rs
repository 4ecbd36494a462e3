//! Stat value objects and their experience costs.
//!
//! Every group is an immutable snapshot: updating a PJ replaces whole
//! snapshots rather than mutating fields in place.

use serde::{Deserialize, Serialize};

use super::formula::{
    basic_first_level_cost, energy_tank_cost, group_required_xp, special_first_level_cost,
    stat_required_xp, BASIC_LEVEL_STEP, LIFE_COST, SPECIAL_LEVEL_STEP,
    SUPERNATURAL_FIRST_LEVEL_COST, SUPERNATURAL_LEVEL_STEP,
};

/// Returns true if any value of `current` is greater than the value at the
/// same position of `candidate`.
///
/// Detects at least one regression; it is not an ordering of snapshots.
fn any_regression(current: &[u32], candidate: &[u32]) -> bool {
    debug_assert_eq!(current.len(), candidate.len());
    current
        .iter()
        .zip(candidate.iter())
        .any(|(before, after)| before > after)
}

// ════════════════════════════════════════════════════════════════════════════
// Basic stats
// ════════════════════════════════════════════════════════════════════════════

/// Physical attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physical {
    pub strength: u32,
    pub agility: u32,
    pub speed: u32,
    pub resistance: u32,
    pub is_talented: bool,
}

impl Physical {
    pub fn new(strength: u32, agility: u32, speed: u32, resistance: u32, is_talented: bool) -> Self {
        Self {
            strength,
            agility,
            speed,
            resistance,
            is_talented,
        }
    }

    /// Member values in declaration order.
    pub fn values(&self) -> [u32; 4] {
        [self.strength, self.agility, self.speed, self.resistance]
    }

    pub fn required_xp(&self) -> u64 {
        group_required_xp(
            self.values().map(u64::from),
            BASIC_LEVEL_STEP,
            basic_first_level_cost(self.is_talented),
        )
    }
}

/// Mental attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mental {
    pub intelligence: u32,
    pub wisdom: u32,
    pub concentration: u32,
    pub will: u32,
    pub is_talented: bool,
}

impl Mental {
    pub fn new(intelligence: u32, wisdom: u32, concentration: u32, will: u32, is_talented: bool) -> Self {
        Self {
            intelligence,
            wisdom,
            concentration,
            will,
            is_talented,
        }
    }

    /// Member values in declaration order.
    pub fn values(&self) -> [u32; 4] {
        [self.intelligence, self.wisdom, self.concentration, self.will]
    }

    pub fn required_xp(&self) -> u64 {
        group_required_xp(
            self.values().map(u64::from),
            BASIC_LEVEL_STEP,
            basic_first_level_cost(self.is_talented),
        )
    }
}

/// Coordination attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordination {
    pub precision: u32,
    pub calculation: u32,
    pub range: u32,
    pub reflexes: u32,
    pub is_talented: bool,
}

impl Coordination {
    pub fn new(precision: u32, calculation: u32, range: u32, reflexes: u32, is_talented: bool) -> Self {
        Self {
            precision,
            calculation,
            range,
            reflexes,
            is_talented,
        }
    }

    /// Member values in declaration order.
    pub fn values(&self) -> [u32; 4] {
        [self.precision, self.calculation, self.range, self.reflexes]
    }

    pub fn required_xp(&self) -> u64 {
        group_required_xp(
            self.values().map(u64::from),
            BASIC_LEVEL_STEP,
            basic_first_level_cost(self.is_talented),
        )
    }
}

/// Basic stats: three attribute groups plus life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicStats {
    pub physical: Physical,
    pub mental: Mental,
    pub coordination: Coordination,
    pub life: u32,
}

impl BasicStats {
    pub fn new(physical: Physical, mental: Mental, coordination: Coordination, life: u32) -> Self {
        Self {
            physical,
            mental,
            coordination,
            life,
        }
    }

    /// All-zero stats carrying the given talent flags (physical, mental, coordination).
    pub fn untrained(physical: bool, mental: bool, coordination: bool) -> Self {
        Self {
            physical: Physical {
                is_talented: physical,
                ..Physical::default()
            },
            mental: Mental {
                is_talented: mental,
                ..Mental::default()
            },
            coordination: Coordination {
                is_talented: coordination,
                ..Coordination::default()
            },
            life: 0,
        }
    }

    /// Experience needed to reach these stats from zero.
    pub fn required_xp(&self) -> u64 {
        self.physical
            .required_xp()
            .saturating_add(self.mental.required_xp())
            .saturating_add(self.coordination.required_xp())
            .saturating_add(LIFE_COST.saturating_mul(u64::from(self.life)))
    }

    /// Physical, mental and coordination members followed by life.
    pub fn ordered_values(&self) -> Vec<u32> {
        let mut values = Vec::with_capacity(13);
        values.extend(self.physical.values());
        values.extend(self.mental.values());
        values.extend(self.coordination.values());
        values.push(self.life);
        values
    }

    /// True if any value in `self` is above its counterpart in `other`.
    pub fn is_higher_than(&self, other: &BasicStats) -> bool {
        any_regression(&self.ordered_values(), &other.ordered_values())
    }

    /// Copy of `self` with the talent flags of `source`.
    pub fn with_talents_from(mut self, source: &BasicStats) -> Self {
        self.physical.is_talented = source.physical.is_talented;
        self.mental.is_talented = source.mental.is_talented;
        self.coordination.is_talented = source.coordination.is_talented;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Special stats
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalSkills {
    pub empowerment: u32,
    pub vital_control: u32,
    pub is_talented: bool,
}

impl PhysicalSkills {
    pub fn new(empowerment: u32, vital_control: u32, is_talented: bool) -> Self {
        Self {
            empowerment,
            vital_control,
            is_talented,
        }
    }

    pub fn values(&self) -> [u32; 2] {
        [self.empowerment, self.vital_control]
    }

    /// The group is priced as one pseudo-stat holding the sum of both skills.
    pub fn required_xp(&self) -> u64 {
        special_group_required_xp(self.values(), self.is_talented)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentalSkills {
    pub illusion: u32,
    pub mental_control: u32,
    pub is_talented: bool,
}

impl MentalSkills {
    pub fn new(illusion: u32, mental_control: u32, is_talented: bool) -> Self {
        Self {
            illusion,
            mental_control,
            is_talented,
        }
    }

    pub fn values(&self) -> [u32; 2] {
        [self.illusion, self.mental_control]
    }

    pub fn required_xp(&self) -> u64 {
        special_group_required_xp(self.values(), self.is_talented)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergySkills {
    pub object_handling: u32,
    pub energy_handling: u32,
    pub is_talented: bool,
}

impl EnergySkills {
    pub fn new(object_handling: u32, energy_handling: u32, is_talented: bool) -> Self {
        Self {
            object_handling,
            energy_handling,
            is_talented,
        }
    }

    pub fn values(&self) -> [u32; 2] {
        [self.object_handling, self.energy_handling]
    }

    pub fn required_xp(&self) -> u64 {
        special_group_required_xp(self.values(), self.is_talented)
    }
}

fn special_group_required_xp(values: [u32; 2], is_talented: bool) -> u64 {
    let total = values.iter().map(|v| u64::from(*v)).sum::<u64>();
    stat_required_xp(total, SPECIAL_LEVEL_STEP, special_first_level_cost(is_talented))
}

/// Special stats: three skill groups plus the energy tank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialStats {
    pub physical: PhysicalSkills,
    pub mental: MentalSkills,
    pub energy: EnergySkills,
    pub energy_tank: u32,
    /// Halves the per-point price of the energy tank.
    pub is_energy_talented: bool,
}

impl SpecialStats {
    pub fn new(
        physical: PhysicalSkills,
        mental: MentalSkills,
        energy: EnergySkills,
        energy_tank: u32,
        is_energy_talented: bool,
    ) -> Self {
        Self {
            physical,
            mental,
            energy,
            energy_tank,
            is_energy_talented,
        }
    }

    /// All-zero stats carrying the given talent flags.
    pub fn untrained(physical: bool, mental: bool, energy: bool, energy_tank: bool) -> Self {
        Self {
            physical: PhysicalSkills {
                is_talented: physical,
                ..PhysicalSkills::default()
            },
            mental: MentalSkills {
                is_talented: mental,
                ..MentalSkills::default()
            },
            energy: EnergySkills {
                is_talented: energy,
                ..EnergySkills::default()
            },
            energy_tank: 0,
            is_energy_talented: energy_tank,
        }
    }

    pub fn required_xp(&self) -> u64 {
        let tank = energy_tank_cost(self.is_energy_talented)
            .saturating_mul(u64::from(self.energy_tank));

        self.physical
            .required_xp()
            .saturating_add(self.mental.required_xp())
            .saturating_add(self.energy.required_xp())
            .saturating_add(tank)
    }

    /// Physical, mental and energy skills followed by the energy tank.
    pub fn ordered_values(&self) -> Vec<u32> {
        let mut values = Vec::with_capacity(7);
        values.extend(self.physical.values());
        values.extend(self.mental.values());
        values.extend(self.energy.values());
        values.push(self.energy_tank);
        values
    }

    pub fn is_higher_than(&self, other: &SpecialStats) -> bool {
        any_regression(&self.ordered_values(), &other.ordered_values())
    }

    pub fn with_talents_from(mut self, source: &SpecialStats) -> Self {
        self.physical.is_talented = source.physical.is_talented;
        self.mental.is_talented = source.mental.is_talented;
        self.energy.is_talented = source.energy.is_talented;
        self.is_energy_talented = source.is_energy_talented;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Supernatural stats
// ════════════════════════════════════════════════════════════════════════════

/// A supernatural skill and the levels of its transformations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub transformations: Vec<u32>,
}

impl Skill {
    pub fn new(transformations: Vec<u32>) -> Self {
        Self { transformations }
    }

    /// Sum of all transformation values.
    pub fn total(&self) -> u64 {
        self.transformations.iter().map(|t| u64::from(*t)).sum()
    }

    pub fn required_xp(&self) -> u64 {
        stat_required_xp(
            self.total(),
            SUPERNATURAL_LEVEL_STEP,
            SUPERNATURAL_FIRST_LEVEL_COST,
        )
    }

    fn transformation(&self, index: usize) -> u32 {
        self.transformations.get(index).copied().unwrap_or(0)
    }
}

/// Supernatural skills, present only on supernatural PJs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupernaturalStats {
    pub skills: Vec<Skill>,
}

impl SupernaturalStats {
    pub fn new(skills: Vec<Skill>) -> Self {
        Self { skills }
    }

    /// The starting point of a new supernatural PJ: one skill with one
    /// untrained transformation.
    pub fn seed() -> Self {
        Self::new(vec![Skill::new(vec![0])])
    }

    pub fn required_xp(&self) -> u64 {
        self.skills
            .iter()
            .fold(0u64, |total, skill| total.saturating_add(skill.required_xp()))
    }

    /// True if any transformation of `self` is above the one at the same
    /// (skill, transformation) position in `other`. A position missing from
    /// `other` counts as zero, so dropping a trained skill is a regression.
    pub fn is_higher_than(&self, other: &SupernaturalStats) -> bool {
        self.skills.iter().enumerate().any(|(i, skill)| {
            let counterpart = other.skills.get(i);
            skill.transformations.iter().enumerate().any(|(j, value)| {
                let candidate = counterpart.map(|s| s.transformation(j)).unwrap_or(0);
                *value > candidate
            })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// XP pools
// ════════════════════════════════════════════════════════════════════════════

/// Three independent experience amounts.
///
/// Used both for a PJ's spendable pools and for its spent totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xp {
    pub basic: u64,
    pub special: u64,
    pub supernatural: u64,
}

impl Xp {
    pub const ZERO: Xp = Xp {
        basic: 0,
        special: 0,
        supernatural: 0,
    };

    pub fn new(basic: u64, special: u64, supernatural: u64) -> Self {
        Self {
            basic,
            special,
            supernatural,
        }
    }

    /// Component-wise addition, saturating at `u64::MAX`.
    pub fn credit(&self, amount: &Xp) -> Xp {
        Xp {
            basic: self.basic.saturating_add(amount.basic),
            special: self.special.saturating_add(amount.special),
            supernatural: self.supernatural.saturating_add(amount.supernatural),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Xp::ZERO
    }
}
