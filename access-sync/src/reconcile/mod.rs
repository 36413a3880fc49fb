//! Roster to Access reconciliation.
//!
//! One run mirrors the Chatwoot roster into the Cloudflare Access group and
//! revokes seats that no longer belong to a current, active user. Runs keep
//! no state between invocations.

pub mod policy;

use std::collections::HashSet;
use std::sync::Arc;

use access_sync_common::{AccessUser, RemovalResult, RosterSummary, Status, SyncReport};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::upstream::{AccessControl, SupportDesk};

/// Runs the reconciliation against injected platform clients.
pub struct SyncEngine {
    support_desk: Arc<dyn SupportDesk>,
    access_control: Arc<dyn AccessControl>,
    settings: SyncConfig,
}

impl SyncEngine {
    pub fn new(
        support_desk: Arc<dyn SupportDesk>,
        access_control: Arc<dyn AccessControl>,
        settings: SyncConfig,
    ) -> Self {
        Self {
            support_desk,
            access_control,
            settings,
        }
    }

    pub async fn run(&self) -> Result<SyncReport> {
        self.run_at(Utc::now()).await
    }

    /// Run with an explicit notion of "now" for the inactivity cutoff.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<SyncReport> {
        let mut users = self.support_desk.fetch_roster().await?;
        self.support_desk.fetch_all_user_details(&mut users).await?;

        let emails = policy::current_emails(&users, self.settings.canonical_account_id);
        tracing::info!(
            "Fetched {} Chatwoot users, {} current emails",
            users.len(),
            emails.len()
        );

        let group_update = self.access_control.replace_group_members(&emails).await;

        let seats = self
            .access_control
            .fetch_seats()
            .await
            .map_err(|failure| Error::SeatListUnavailable(failure.message))?;

        let threshold = self.settings.inactivity_days_threshold;
        let cutoff = policy::inactivity_cutoff(now, threshold);
        let current: HashSet<&str> = emails.iter().map(String::as_str).collect();

        let mut removals = Vec::new();
        for seat in &seats {
            let decision = policy::should_remove_seat(seat, &current, cutoff, threshold)?;
            if decision.should_remove && seat.holds_seat() {
                tracing::info!("Revoking seat of {}: {}", seat.email, decision.reason);
                removals.push(self.remove_seat(seat, decision.reason));
            }
        }

        let seat_removal_results: Vec<RemovalResult> =
            join_all(removals).await.into_iter().flatten().collect();

        let failed = seat_removal_results
            .iter()
            .filter(|r| !r.result.is_success())
            .count();
        tracing::info!(
            "Sync finished: {} seats checked, {} revoked, {} revocations failed",
            seats.len(),
            seat_removal_results.len() - failed,
            failed
        );

        Ok(SyncReport {
            status: Status::Success,
            users: RosterSummary::from_users(&users),
            cloudflare_group_update: group_update,
            cloudflare_users: seats,
            seat_removal_results,
        })
    }

    /// Revoke a seat; `None` when there is no seat left to revoke.
    async fn remove_seat(&self, seat: &AccessUser, reason: String) -> Option<RemovalResult> {
        if !seat.holds_seat() {
            return None;
        }

        let result = self.access_control.revoke_seat(&seat.seat_uid).await;
        Some(RemovalResult {
            user_id: seat.id.clone(),
            email: seat.email.clone(),
            seat_uid: seat.seat_uid.clone(),
            removal_reason: reason,
            result,
        })
    }
}
