//! GetPjHandler - Query handler for reading a PJ.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Pj};
use crate::domain::foundation::PjId;
use crate::ports::PjRepository;

#[derive(Debug, Clone)]
pub struct GetPjQuery {
    pub pj_id: PjId,
}

/// Loads a PJ and recomputes its spent XP from the stored stats.
pub struct GetPjHandler {
    repository: Arc<dyn PjRepository>,
}

impl GetPjHandler {
    pub fn new(repository: Arc<dyn PjRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetPjQuery) -> Result<Pj, CampaignError> {
        let mut pj = self
            .repository
            .find_by_id(&query.pj_id)
            .await?
            .ok_or(CampaignError::PjNotFound(query.pj_id))?;
        pj.load_required_xp();
        Ok(pj)
    }
}
