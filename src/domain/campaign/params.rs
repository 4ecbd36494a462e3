//! PJ creation parameters.

use serde::{Deserialize, Serialize};

use super::PjType;
use crate::domain::foundation::ValidationError;

pub const MIN_LOOK: u32 = 1;
pub const MAX_LOOK: u32 = 20;
pub const MIN_CHARISMA: i32 = -10;
pub const MAX_CHARISMA: i32 = 10;
pub const MAX_VILLAINY: u32 = 10;
pub const MAX_HEROISM: u32 = 10;

/// Talent flags chosen when the PJ is created. They never change afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talents {
    pub physical: bool,
    pub mental: bool,
    pub coordination: bool,
    pub physical_skills: bool,
    pub mental_skills: bool,
    pub energy_skills: bool,
    /// Cheaper energy tank.
    pub energy: bool,
}

/// Everything a player chooses when creating a PJ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PjCreateParams {
    pub name: String,
    pub weight: u32,
    pub height: u32,
    pub age: u32,
    pub look: u32,
    pub charisma: i32,
    pub villainy: u32,
    pub heroism: u32,
    pub pj_type: PjType,
    pub talents: Talents,
}

impl PjCreateParams {
    /// Checks the descriptive fields. Stats are not part of creation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.weight == 0 {
            return Err(ValidationError::out_of_range("weight", 1, i32::MAX, 0));
        }
        if self.height == 0 {
            return Err(ValidationError::out_of_range("height", 1, i32::MAX, 0));
        }
        check_range("look", self.look, MIN_LOOK, MAX_LOOK)?;
        if !(MIN_CHARISMA..=MAX_CHARISMA).contains(&self.charisma) {
            return Err(ValidationError::out_of_range(
                "charisma",
                MIN_CHARISMA,
                MAX_CHARISMA,
                self.charisma,
            ));
        }
        check_range("villainy", self.villainy, 0, MAX_VILLAINY)?;
        check_range("heroism", self.heroism, 0, MAX_HEROISM)?;
        Ok(())
    }
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::out_of_range(
        field,
        min as i32,
        max as i32,
        i32::try_from(value).unwrap_or(i32::MAX),
    ))
}

#[cfg(test)]
pub(crate) fn sample_params(pj_type: PjType) -> PjCreateParams {
    PjCreateParams {
        name: "Aldric".to_string(),
        weight: 70,
        height: 175,
        age: 25,
        look: 5,
        charisma: 5,
        villainy: 5,
        heroism: 5,
        pj_type,
        talents: Talents {
            physical: true,
            physical_skills: true,
            ..Talents::default()
        },
    }
}
