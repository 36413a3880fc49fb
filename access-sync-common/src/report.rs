//! Sync run report types.

use serde::{Deserialize, Serialize};

use crate::chatwoot::ChatwootUser;
use crate::cloudflare::{AccessFailure, AccessUser};

/// Top-level outcome marker used in every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// Whether a seat should lose its access, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalDecision {
    pub should_remove: bool,
    pub reason: String,
}

impl RemovalDecision {
    pub fn keep() -> Self {
        Self {
            should_remove: false,
            reason: String::new(),
        }
    }

    pub fn remove(reason: impl Into<String>) -> Self {
        Self {
            should_remove: true,
            reason: reason.into(),
        }
    }
}

/// Outcome of a single seat revocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RevokeOutcome {
    Success {
        message: String,
        #[serde(default)]
        result: serde_json::Value,
    },
    Error {
        message: String,
        /// `errors` array from a Cloudflare response with `success: false`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        errors: Option<serde_json::Value>,
        /// Transport or status failure description.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error_details: Option<String>,
    },
}

impl RevokeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RevokeOutcome::Success { .. })
    }
}

/// Report line for a seat that was revoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalResult {
    pub user_id: String,
    pub email: String,
    pub seat_uid: String,
    pub removal_reason: String,
    pub result: RevokeOutcome,
}

/// Result of replacing the access group's members.
///
/// On success this is Cloudflare's response body verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupUpdate {
    Applied(serde_json::Value),
    Failed {
        status: Status,
        #[serde(flatten)]
        failure: AccessFailure,
    },
}

impl GroupUpdate {
    pub fn failed(failure: AccessFailure) -> Self {
        GroupUpdate::Failed {
            status: Status::Error,
            failure,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, GroupUpdate::Applied(_))
    }
}

/// Per-user line of the roster summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub availability: String,
}

impl From<&ChatwootUser> for UserSummary {
    fn from(user: &ChatwootUser) -> Self {
        let (name, email) = match &user.details {
            Some(details) => (details.name.clone(), details.email.clone()),
            None => ("N/A".to_string(), "N/A".to_string()),
        };
        Self {
            id: user.id,
            name,
            email,
            role: user.role.clone(),
            availability: user.availability.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub count: usize,
    pub data: Vec<UserSummary>,
}

impl RosterSummary {
    /// Summarize the whole roster, including users outside the canonical account.
    pub fn from_users(users: &[ChatwootUser]) -> Self {
        Self {
            count: users.len(),
            data: users.iter().map(UserSummary::from).collect(),
        }
    }
}

/// Full report of one sync run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub status: Status,
    pub users: RosterSummary,
    pub cloudflare_group_update: GroupUpdate,
    pub cloudflare_users: Vec<AccessUser>,
    pub seat_removal_results: Vec<RemovalResult>,
}
