//! Strongly-typed identifier value objects.
//!
//! Entity ids are opaque strings minted by an `IdGenerator` port, so every id
//! type wraps a `String` and rejects the empty string.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the id, returning an error if it is empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier for a campaign.
    CampaignId,
    "campaign_id"
);

string_id!(
    /// Unique identifier for a player character.
    PjId,
    "pj_id"
);

string_id!(
    /// Unique identifier for a logged play session.
    SessionId,
    "session_id"
);

string_id!(
    /// Unique identifier for a campaign invitation.
    InvitationId,
    "invitation_id"
);

string_id!(
    /// User identifier (masters and players alike).
    UserId,
    "user_id"
);

impl UserId {
    /// The identity used for commands that no human issued (e.g. the event worker).
    pub fn system() -> Self {
        Self("system".to_string())
    }
}
