//! In-memory adapters.
//!
//! Back the persistence, outbox, idempotency and identification ports with
//! process memory. Nothing survives a restart.

mod id_generator;
mod outbox;
mod processed_event_store;
mod repositories;

pub use id_generator::{SequentialIdGenerator, UuidIdGenerator};
pub use outbox::InMemoryOutbox;
pub use processed_event_store::InMemoryProcessedEventStore;
pub use repositories::{
    InMemoryCampaignRepository, InMemoryPjRepository, InMemorySessionRepository,
    InMemoryUserRepository,
};
