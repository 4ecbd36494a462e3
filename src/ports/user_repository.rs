//! User repository port (read side for campaigns).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;

/// Lookup of registered users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a user.
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;
}
