//! Upstream platform clients.
//!
//! The sync engine only talks to these two traits. The reqwest-backed
//! [`ChatwootClient`] and [`CloudflareClient`] are the production
//! implementations; tests substitute in-memory ones.

mod chatwoot;
mod cloudflare;

pub use chatwoot::ChatwootClient;
pub use cloudflare::CloudflareClient;

use access_sync_common::{AccessFailure, AccessUser, ChatwootUser, GroupUpdate, RevokeOutcome};
use async_trait::async_trait;
use futures_util::future::try_join_all;

use crate::error::Result;

/// Source of the support-desk roster.
///
/// Failures are errors: a roster that cannot be read aborts the run.
#[async_trait]
pub trait SupportDesk: Send + Sync {
    /// Fetch every account user of the configured account.
    async fn fetch_roster(&self) -> Result<Vec<ChatwootUser>>;

    /// Fill in `user.details`, leaving it `None` when the profile is not
    /// retrievable (401/404).
    async fn fetch_user_details(&self, user: &mut ChatwootUser) -> Result<()>;

    /// Fetch all profiles concurrently. The first failure wins and the
    /// remaining requests are dropped.
    async fn fetch_all_user_details(&self, users: &mut [ChatwootUser]) -> Result<()> {
        try_join_all(users.iter_mut().map(|user| self.fetch_user_details(user))).await?;
        Ok(())
    }
}

/// Access-control platform holding the group and the seats.
///
/// Every call reports failure as a value; none of them abort a run on their own.
#[async_trait]
pub trait AccessControl: Send + Sync {
    /// List all Access users with their seat flags.
    async fn fetch_seats(&self) -> std::result::Result<Vec<AccessUser>, AccessFailure>;

    /// Replace the access group's include list with exactly these emails.
    async fn replace_group_members(&self, emails: &[String]) -> GroupUpdate;

    /// Clear both seat flags for `seat_uid`.
    async fn revoke_seat(&self, seat_uid: &str) -> RevokeOutcome;
}
