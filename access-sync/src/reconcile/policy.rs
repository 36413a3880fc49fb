//! Seat removal policy.

use std::collections::HashSet;

use access_sync_common::{AccessUser, ChatwootUser, LoginTime, RemovalDecision};
use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};

/// Removal reason for seats whose email is not on the roster.
pub const NOT_IN_CHATWOOT: &str = "Not in Chatwoot";

/// Emails of users in the canonical account that have a profile, in roster order.
pub fn current_emails(users: &[ChatwootUser], canonical_account_id: i64) -> Vec<String> {
    users
        .iter()
        .filter(|user| user.account_id == canonical_account_id)
        .filter_map(|user| user.email().map(str::to_string))
        .collect()
}

/// Logins strictly before the returned instant count as inactive.
pub fn inactivity_cutoff(now: DateTime<Utc>, threshold_days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(threshold_days))
}

/// Decide whether `seat` should lose its access.
///
/// Email matching is exact. A login time that cannot be normalized is an
/// error rather than a silent keep.
pub fn should_remove_seat(
    seat: &AccessUser,
    current_emails: &HashSet<&str>,
    cutoff: DateTime<Utc>,
    threshold_days: u32,
) -> Result<RemovalDecision> {
    if !current_emails.contains(seat.email.as_str()) {
        return Ok(RemovalDecision::remove(NOT_IN_CHATWOOT));
    }

    let Some(login) = &seat.last_successful_login else {
        return Ok(RemovalDecision::keep());
    };

    let last_login = login.to_utc().ok_or_else(|| Error::InvalidTimestamp {
        email: seat.email.clone(),
        value: match login {
            LoginTime::Raw(raw) => raw.clone(),
            other => format!("{:?}", other),
        },
    })?;

    if last_login < cutoff {
        Ok(RemovalDecision::remove(format!(
            "Inactive for more than {} days",
            threshold_days
        )))
    } else {
        Ok(RemovalDecision::keep())
    }
}
