//! XpAssignedHandler - Event handler crediting session awards to PJs.
//!
//! The second half of the XP hand-off: a session records one `xp_assigned`
//! envelope per award, and the worker feeds them here. The PJ is the
//! envelope's aggregate; the amounts come from the `assigned_xp` payload
//! field.
//!
//! Envelopes that can never succeed (unreadable payload, unknown PJ) are
//! logged and acknowledged so they do not circle the queue forever.
//! Infrastructure failures are returned and the envelope is redelivered.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConsumeXpCommand, ConsumeXpHandler};
use crate::domain::campaign::CampaignError;
use crate::domain::foundation::{CommandMetadata, DomainError, EventEnvelope, PjId};
use crate::domain::progression::Xp;
use crate::domain::session::events::XP_ASSIGNED;
use crate::ports::{EventHandler, PjRepository};

/// The part of an `xp_assigned` payload this handler reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpAssignedPayload {
    pub assigned_xp: Xp,
}

pub struct XpAssignedHandler {
    consume_xp: ConsumeXpHandler,
}

impl XpAssignedHandler {
    pub fn new(pjs: Arc<dyn PjRepository>) -> Self {
        Self {
            consume_xp: ConsumeXpHandler::new(pjs),
        }
    }

    fn command_for(event: &EventEnvelope) -> Result<ConsumeXpCommand, String> {
        let pj_id = PjId::new(event.aggregate_id.clone()).map_err(|e| e.to_string())?;
        let payload: XpAssignedPayload = event.payload_as().map_err(|e| e.to_string())?;
        Ok(ConsumeXpCommand {
            pj_id,
            xp: payload.assigned_xp,
        })
    }
}

#[async_trait]
impl EventHandler for XpAssignedHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if event.event_type != XP_ASSIGNED {
            debug!(event_type = %event.event_type, "ignoring event");
            return Ok(());
        }

        let cmd = match Self::command_for(&event) {
            Ok(cmd) => cmd,
            Err(reason) => {
                tracing::error!(event_id = %event.event_id, %reason, "malformed xp_assigned event dropped");
                return Ok(());
            }
        };

        match self
            .consume_xp
            .handle(cmd, CommandMetadata::caused_by(&event))
            .await
        {
            Ok(_) => Ok(()),
            Err(CampaignError::PjNotFound(pj_id)) => {
                tracing::error!(event_id = %event.event_id, %pj_id, "xp assigned to unknown pj, dropped");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "XpAssignedHandler"
    }
}
