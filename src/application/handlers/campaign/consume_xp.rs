//! ConsumeXpHandler - Command handler crediting awarded XP to a PJ.
//!
//! Runs in the worker, driven by `xp_assigned` events. It is not idempotent;
//! the worker deduplicates deliveries before calling it. The credited PJ and
//! its `xp_consumed` event are written in one repository call, so once this
//! returns `Ok` nothing downstream can make the delivery fail and be retried.

use std::sync::Arc;

use crate::domain::campaign::{CampaignError, Pj, XpConsumed};
use crate::domain::foundation::{CommandMetadata, PjId, SerializableDomainEvent};
use crate::domain::progression::Xp;
use crate::ports::PjRepository;

#[derive(Debug, Clone)]
pub struct ConsumeXpCommand {
    pub pj_id: PjId,
    pub xp: Xp,
}

#[derive(Debug, Clone)]
pub struct ConsumeXpResult {
    pub pj: Pj,
    pub event: XpConsumed,
}

pub struct ConsumeXpHandler {
    repository: Arc<dyn PjRepository>,
}

impl ConsumeXpHandler {
    pub fn new(repository: Arc<dyn PjRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ConsumeXpCommand,
        metadata: CommandMetadata,
    ) -> Result<ConsumeXpResult, CampaignError> {
        let mut pj = self
            .repository
            .find_by_id(&cmd.pj_id)
            .await?
            .ok_or_else(|| CampaignError::PjNotFound(cmd.pj_id.clone()))?;

        let event = pj.consume_xp(cmd.xp);

        self.repository
            .update(&pj, &[metadata.stamp(event.to_envelope())])
            .await?;

        tracing::info!(
            pj_id = %pj.id(),
            basic = cmd.xp.basic,
            special = cmd.xp.special,
            supernatural = cmd.xp.supernatural,
            "xp consumed"
        );

        Ok(ConsumeXpResult { pj, event })
    }
}
