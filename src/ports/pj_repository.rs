//! PJ repository port (write side).

use async_trait::async_trait;

use crate::domain::campaign::Pj;
use crate::domain::foundation::{CampaignId, DomainError, EventEnvelope, PjId};

/// Repository port for PJ aggregate persistence.
///
/// Concurrent `update` calls for the same PJ must be serialized by the
/// implementation; the aggregate assumes exclusive access per operation.
/// The events passed to a write are stored atomically with the PJ.
#[async_trait]
pub trait PjRepository: Send + Sync {
    /// Save a new PJ and its events.
    async fn save(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError>;

    /// Update an existing PJ (stats and XP pools) and record its events.
    ///
    /// # Errors
    ///
    /// - `PjNotFound` if the PJ doesn't exist; nothing is recorded
    /// - `DatabaseError` on persistence failure
    async fn update(&self, pj: &Pj, events: &[EventEnvelope]) -> Result<(), DomainError>;

    /// Find a PJ by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &PjId) -> Result<Option<Pj>, DomainError>;

    /// All PJs of a campaign, ordered by id.
    async fn find_by_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<Pj>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pj_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PjRepository) {}
    }
}
