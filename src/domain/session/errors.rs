//! Session-specific error types.

use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{CampaignId, DomainError, ErrorCode, PjId, ValidationError};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The campaign the session is logged for does not exist.
    CampaignNotFound(CampaignId),
    /// Some awarded PJs are not part of the campaign.
    PjsNotInCampaign(Vec<PjId>),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// A port failed; the original error is kept.
    Infrastructure(DomainError),
}

impl SessionError {
    pub fn campaign_not_found(id: CampaignId) -> Self {
        SessionError::CampaignNotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::CampaignNotFound(_) => ErrorCode::CampaignNotFound,
            SessionError::PjsNotInCampaign(_) => ErrorCode::PjsNotInCampaign,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(err) => err.code,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::CampaignNotFound(id) => format!("Campaign not found: {}", id),
            SessionError::PjsNotInCampaign(ids) => {
                let ids: Vec<&str> = ids.iter().map(PjId::as_str).collect();
                format!("PJs do not belong to the campaign: {}", ids.join(", "))
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(err) => format!("Error: {}", err),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err),
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        SessionError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<CampaignError> for SessionError {
    fn from(err: CampaignError) -> Self {
        match err {
            CampaignError::CampaignNotFound(id) => SessionError::CampaignNotFound(id),
            CampaignError::PjsNotInCampaign(ids) => SessionError::PjsNotInCampaign(ids),
            CampaignError::Validation(inner) => inner.into(),
            other => SessionError::Infrastructure(other.into()),
        }
    }
}
