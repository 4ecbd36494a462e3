//! Session command and query handlers.

mod create_session;
mod get_sessions;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_sessions::{GetSessionsHandler, GetSessionsQuery};
