//! Campaign and PJ error types.

use thiserror::Error;

use crate::domain::foundation::{
    CampaignId, DomainError, ErrorCode, PjId, UserId, ValidationError,
};

/// Errors raised by the campaign and PJ aggregates and their handlers.
///
/// Every rule violation is detected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("Campaign not found: {0}")]
    CampaignNotFound(CampaignId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("PJ not found: {0}")]
    PjNotFound(PjId),

    #[error("User {0} has no pending invitation to this campaign")]
    UserNotInvited(UserId),

    #[error("User {0} does not have the player role")]
    UserNotPlayer(UserId),

    #[error("PJs do not belong to the campaign: {}", join_ids(.0))]
    PjsNotInCampaign(Vec<PjId>),

    #[error("Stats cannot be reduced")]
    CannotReduceStats,

    #[error("Insufficient {pool} XP: {required} required, {available} available")]
    InsufficientXp {
        pool: &'static str,
        required: u64,
        available: u64,
    },

    #[error("Supernatural PJs must provide supernatural stats")]
    SupernaturalStatsRequired,

    #[error("Only supernatural PJs can update supernatural stats")]
    CannotUpdateSupernaturalStats,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A port failed. The original error, code included, is kept.
    #[error("Error: {0}")]
    Infrastructure(#[from] DomainError),
}

impl CampaignError {
    pub fn insufficient_xp(pool: &'static str, required: u64, available: u64) -> Self {
        CampaignError::InsufficientXp {
            pool,
            required,
            available,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CampaignError::CampaignNotFound(_) => ErrorCode::CampaignNotFound,
            CampaignError::UserNotFound(_) => ErrorCode::UserNotFound,
            CampaignError::PjNotFound(_) => ErrorCode::PjNotFound,
            CampaignError::UserNotInvited(_) => ErrorCode::UserNotInvited,
            CampaignError::UserNotPlayer(_) => ErrorCode::UserNotPlayer,
            CampaignError::PjsNotInCampaign(_) => ErrorCode::PjsNotInCampaign,
            CampaignError::CannotReduceStats => ErrorCode::CannotReduceStats,
            CampaignError::InsufficientXp { .. } => ErrorCode::InsufficientXp,
            CampaignError::SupernaturalStatsRequired => ErrorCode::SupernaturalStatsRequired,
            CampaignError::CannotUpdateSupernaturalStats => {
                ErrorCode::CannotUpdateSupernaturalStats
            }
            CampaignError::Validation(_) => ErrorCode::ValidationFailed,
            CampaignError::Infrastructure(err) => err.code,
        }
    }
}

fn join_ids(ids: &[PjId]) -> String {
    ids.iter()
        .map(PjId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CampaignError> for DomainError {
    fn from(err: CampaignError) -> Self {
        match err {
            CampaignError::Infrastructure(inner) => inner,
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
