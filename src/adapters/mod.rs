//! Adapters - Implementations of port interfaces.
//!
//! - `events` - Event bus, queues, outbox relay, idempotency, retention and
//!   the consume loop
//! - `memory` - In-memory repositories, outbox, processed-event store, id
//!   generators
//! - `redis` - Redis-backed PJ storage

pub mod events;
pub mod memory;
pub mod redis;

pub use events::{
    EventWorker, EventWorkerConfig, IdempotentHandler, InMemoryEventBus, InMemoryEventQueue,
    OutboxPublisher, OutboxPublisherConfig, RedisEventQueue, RetentionSweeper, SweepReport,
};
pub use memory::{
    InMemoryCampaignRepository, InMemoryOutbox, InMemoryPjRepository, InMemoryProcessedEventStore,
    InMemorySessionRepository, InMemoryUserRepository, SequentialIdGenerator, UuidIdGenerator,
};
pub use self::redis::RedisPjRepository;
