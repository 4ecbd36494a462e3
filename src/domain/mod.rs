//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `progression` - Stat value objects and the XP cost formula
//! - `campaign` - Campaign aggregate, invitations and the PJ aggregate
//! - `session` - Play sessions and their XP awards
//! - `user` - Users and roles

pub mod campaign;
pub mod foundation;
pub mod progression;
pub mod session;
pub mod user;
