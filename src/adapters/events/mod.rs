//! Event transport adapters.
//!
//! - `InMemoryEventBus` - Synchronous in-process bus with subscriptions
//! - `InMemoryEventQueue` - Process-local queue, publisher and source
//! - `RedisEventQueue` - Redis list queue, publisher and source
//! - `IdempotentHandler` - Drops redelivered events per handler
//! - `EventWorker` - Consume loop feeding a queue into one handler
//! - `OutboxPublisher` - Relays outbox entries to a queue
//! - `RetentionSweeper` - Periodically forgets old processed-event records

mod idempotent_handler;
mod in_memory;
mod in_memory_queue;
mod outbox_publisher;
mod redis_queue;
mod retention;
mod worker;

pub use idempotent_handler::IdempotentHandler;
pub use in_memory::InMemoryEventBus;
pub use in_memory_queue::InMemoryEventQueue;
pub use outbox_publisher::{OutboxPublisher, OutboxPublisherConfig};
pub use redis_queue::RedisEventQueue;
pub use retention::{RetentionSweeper, SweepReport};
pub use worker::{Delivery, EventWorker, EventWorkerConfig};
