//! Campaign and PJ command, query and event handlers.

mod consume_xp;
mod create_campaign;
mod create_pj;
mod get_campaign;
mod get_campaigns;
mod get_invitations;
mod get_pj;
mod get_pjs;
mod invite_user;
mod update_pj_stats;
mod xp_assigned_handler;

pub use consume_xp::{ConsumeXpCommand, ConsumeXpHandler, ConsumeXpResult};
pub use create_campaign::{CreateCampaignCommand, CreateCampaignHandler, CreateCampaignResult};
pub use create_pj::{CreatePjCommand, CreatePjHandler, CreatePjResult};
pub use get_campaign::{GetCampaignHandler, GetCampaignQuery};
pub use get_campaigns::{CampaignRole, GetCampaignsHandler, GetCampaignsQuery};
pub use get_invitations::{GetInvitationsHandler, GetInvitationsQuery};
pub use get_pj::{GetPjHandler, GetPjQuery};
pub use get_pjs::{GetPjsHandler, GetPjsQuery};
pub use invite_user::{InviteUserCommand, InviteUserHandler, InviteUserResult};
pub use update_pj_stats::{UpdatePjStatsCommand, UpdatePjStatsHandler, UpdatePjStatsResult};
pub use xp_assigned_handler::{XpAssignedHandler, XpAssignedPayload};
