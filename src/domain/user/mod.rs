//! User domain module.
//!
//! Only the parts campaigns depend on: identity, display name and role.
//! Credentials and account lifecycle live outside this crate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{UserId, ValidationError};

/// Role granted to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Master,
    Player,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Master => "master",
            UserRole::Player => "player",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    role: UserRole,
}

impl User {
    /// Creates a user, rejecting an empty username.
    pub fn new(id: UserId, username: impl Into<String>, role: UserRole) -> Result<Self, ValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        Ok(Self { id, username, role })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Only players can be invited to campaigns.
    pub fn is_player(&self) -> bool {
        self.role == UserRole::Player
    }
}
