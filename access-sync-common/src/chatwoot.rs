//! Chatwoot platform API user types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile returned by `GET /platform/api/v1/users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatwootUserDetails {
    pub id: i64,
    pub uid: String,
    pub name: String,
    pub available_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub role: Option<String>,
    pub confirmed: bool,
    #[serde(default)]
    pub custom_attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub accounts: Vec<serde_json::Value>,
}

/// Account membership row from the account users listing.
///
/// `details` is never part of the listing itself; it is filled in by a
/// separate profile fetch and stays `None` when the profile is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatwootUser {
    pub id: i64,
    pub account_id: i64,
    pub user_id: i64,
    pub role: String,
    #[serde(default)]
    pub inviter_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub active_at: Option<DateTime<Utc>>,
    pub availability: String,
    pub auto_offline: bool,
    #[serde(default)]
    pub details: Option<ChatwootUserDetails>,
}

impl ChatwootUser {
    /// Profile email, if the profile could be fetched.
    pub fn email(&self) -> Option<&str> {
        self.details.as_ref().map(|d| d.email.as_str())
    }
}

/// Body of the account users listing.
///
/// Chatwoot answers with either a bare array or an object wrapping it in
/// `users`; an object without `users` is an empty roster.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RosterResponse {
    List(Vec<ChatwootUser>),
    Wrapped {
        #[serde(default)]
        users: Vec<ChatwootUser>,
    },
}

impl RosterResponse {
    pub fn into_users(self) -> Vec<ChatwootUser> {
        match self {
            RosterResponse::List(users) => users,
            RosterResponse::Wrapped { users } => users,
        }
    }
}
