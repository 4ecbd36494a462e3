//! Command, query and event handlers.
//!
//! Each handler owns its ports as `Arc<dyn Port>` and takes a command plus
//! `CommandMetadata`. Command handlers never publish: the stamped events
//! are handed to the repository write that persists the aggregate, which
//! records them in the outbox. Query handlers only read.

pub mod campaign;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use campaign::{
    CampaignRole, ConsumeXpCommand, ConsumeXpHandler, ConsumeXpResult, CreateCampaignCommand,
    CreateCampaignHandler, CreateCampaignResult, CreatePjCommand, CreatePjHandler,
    CreatePjResult, GetCampaignHandler, GetCampaignQuery, GetCampaignsHandler,
    GetCampaignsQuery, GetInvitationsHandler, GetInvitationsQuery, GetPjHandler, GetPjQuery,
    GetPjsHandler, GetPjsQuery, InviteUserCommand, InviteUserHandler, InviteUserResult,
    UpdatePjStatsCommand, UpdatePjStatsHandler, UpdatePjStatsResult, XpAssignedHandler,
    XpAssignedPayload,
};
pub use session::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, GetSessionsHandler,
    GetSessionsQuery,
};
