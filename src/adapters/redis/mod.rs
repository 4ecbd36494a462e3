//! Redis-backed persistence.
//!
//! - `pj_repository` - PJ storage whose writes push their events onto the
//!   event queue list in the same atomic script

mod pj_repository;

pub use pj_repository::RedisPjRepository;
