//! Character progression: stat value objects and the experience-cost formula.
//!
//! Pure and synchronous. Aggregates call into this module to price stat
//! snapshots and to detect stat regressions.

pub mod formula;
mod stats;

pub use stats::{
    BasicStats, Coordination, EnergySkills, Mental, MentalSkills, Physical, PhysicalSkills, Skill,
    SpecialStats, SupernaturalStats, Xp,
};
