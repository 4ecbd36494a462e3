//! Campaign domain module.
//!
//! Owns the invitation lifecycle, the set of PJs in a campaign and the PJ
//! aggregate itself.
//!
//! # Events
//!
//! - `CampaignCreated` - A campaign was opened
//! - `UserInvited` - A player was invited
//! - `PjAdded` - An invited player created their PJ
//! - `XpConsumed` - Awarded XP reached a PJ's pools
//! - `StatsUpdated` - A PJ bought stats

mod aggregate;
mod errors;
pub mod events;
mod invitation;
mod params;
mod pj;

pub use aggregate::Campaign;
pub use errors::CampaignError;
pub use events::{CampaignCreated, PjAdded, StatsUpdated, UserInvited, XpConsumed};
pub use invitation::{Invitation, InvitationState};
pub use params::{PjCreateParams, Talents};
pub use pj::{Pj, PjType};

#[cfg(test)]
pub(crate) use params::sample_params;
#[cfg(test)]
pub(crate) use pj::test_pj;
