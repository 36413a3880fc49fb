//! access-sync Common Types
//!
//! Record types shared by the sync service and its tests: Chatwoot roster
//! users, Cloudflare Access seats, and the report produced by a sync run.

pub mod chatwoot;
pub mod cloudflare;
pub mod report;

pub use chatwoot::{ChatwootUser, ChatwootUserDetails, RosterResponse};
pub use cloudflare::{AccessFailure, AccessUser, AccessUsersResponse, LoginTime};
pub use report::{
    GroupUpdate, RemovalDecision, RemovalResult, RevokeOutcome, RosterSummary, Status,
    SyncReport, UserSummary,
};
