//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates the campaign, PJ and session aggregates through the ports.
//! Command handlers write, the `Get*` handlers read, and `XpAssignedHandler`
//! reacts to events delivered by the worker.

pub mod handlers;

pub use handlers::{
    // Campaign and PJ commands
    ConsumeXpCommand, ConsumeXpHandler, ConsumeXpResult,
    CreateCampaignCommand, CreateCampaignHandler, CreateCampaignResult,
    CreatePjCommand, CreatePjHandler, CreatePjResult,
    InviteUserCommand, InviteUserHandler, InviteUserResult,
    UpdatePjStatsCommand, UpdatePjStatsHandler, UpdatePjStatsResult,
    // Campaign and PJ queries
    CampaignRole, GetCampaignHandler, GetCampaignQuery,
    GetCampaignsHandler, GetCampaignsQuery,
    GetInvitationsHandler, GetInvitationsQuery,
    GetPjHandler, GetPjQuery,
    GetPjsHandler, GetPjsQuery,
    // Events
    XpAssignedHandler, XpAssignedPayload,
    // Session handlers
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    GetSessionsHandler, GetSessionsQuery,
};
