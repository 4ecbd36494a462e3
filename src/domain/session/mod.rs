//! Session domain module.
//!
//! A session records what happened in one play session and the XP each PJ
//! earned. Sessions are immutable once created.
//!
//! # Events
//!
//! - `SessionCreated` - Published when a session is logged
//! - `XpAssigned` - Published once per award, consumed by the XP worker

mod aggregate;
mod errors;
pub mod events;

pub use aggregate::{Session, SessionCreation, XpAssignation};
pub use errors::SessionError;
pub use events::{SessionCreated, XpAssigned};
