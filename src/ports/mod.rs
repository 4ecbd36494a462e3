//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//! - `EventSource` - Consuming side of the event queue
//! - `ProcessedEventStore` - Idempotency tracking for event handlers
//! - `OutboxWriter` - Events stored with their aggregate, relayed later
//!
//! ## Persistence Ports
//!
//! - `CampaignRepository`, `PjRepository`, `SessionRepository`, `UserRepository`
//!
//! Campaign, PJ and session writes take the envelopes the change produced
//! and store them in the same write as the aggregate.
//!
//! ## Identification
//!
//! - `IdGenerator` - Mints entity ids for aggregate constructors

mod campaign_repository;
mod event_publisher;
mod event_source;
mod event_subscriber;
mod id_generator;
mod outbox_writer;
mod pj_repository;
mod processed_event_store;
mod session_repository;
mod user_repository;

pub use campaign_repository::CampaignRepository;
pub use event_publisher::EventPublisher;
pub use event_source::EventSource;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use id_generator::IdGenerator;
pub use outbox_writer::{OutboxEntry, OutboxStatus, OutboxWriter};
pub use pj_repository::PjRepository;
pub use processed_event_store::ProcessedEventStore;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;
