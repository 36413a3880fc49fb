//! Cloudflare Access API client.

use access_sync_common::{AccessFailure, AccessUser, AccessUsersResponse, GroupUpdate, RevokeOutcome};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::AccessControl;
use crate::config::CloudflareConfig;

/// Cloudflare Access client scoped to one account and one access group.
pub struct CloudflareClient {
    http_client: Client,
    api_base: String,
    account_id: String,
    api_token: String,
    group_id: String,
    group_name: String,
}

impl CloudflareClient {
    pub fn new(config: &CloudflareConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Build on an existing client so connections can be shared.
    pub fn with_client(http_client: Client, config: &CloudflareConfig) -> Self {
        Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            api_token: config.api_token.clone(),
            group_id: config.access_group_id.clone(),
            group_name: config.access_group_name.clone(),
        }
    }

    fn account_url(&self, path: &str) -> String {
        format!("{}/accounts/{}{}", self.api_base, self.account_id, path)
    }

    /// Send with bearer auth and decode the JSON body.
    async fn call(&self, request: RequestBuilder) -> Result<serde_json::Value, CallError> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| CallError::Unexpected(e.to_string()))?;
        let response = response.error_for_status().map_err(CallError::Status)?;
        response
            .json()
            .await
            .map_err(|e| CallError::Unexpected(e.to_string()))
    }
}

/// Why a Cloudflare call did not produce a usable body.
#[derive(Debug)]
enum CallError {
    /// Non-2xx response.
    Status(reqwest::Error),
    /// Transport failure or undecodable body.
    Unexpected(String),
}

const UNEXPECTED: &str = "Unexpected error occurred";

// ============================================================================
// Cloudflare API types
// ============================================================================

#[derive(Debug, Serialize)]
struct GroupUpdateRequest<'a> {
    exclude: Vec<EmailRule<'a>>,
    include: Vec<EmailRule<'a>>,
    is_default: bool,
    name: &'a str,
    require: Vec<EmailRule<'a>>,
}

#[derive(Debug, Serialize)]
struct EmailRule<'a> {
    email: EmailMatch<'a>,
}

#[derive(Debug, Serialize)]
struct EmailMatch<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct SeatUpdate<'a> {
    access_seat: bool,
    gateway_seat: bool,
    seat_uid: &'a str,
}

#[derive(Debug, Deserialize)]
struct SeatUpdateResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

// ============================================================================
// AccessControl implementation
// ============================================================================

#[async_trait]
impl AccessControl for CloudflareClient {
    async fn fetch_seats(&self) -> Result<Vec<AccessUser>, AccessFailure> {
        let request = self.http_client.get(self.account_url("/access/users"));

        let body = match self.call(request).await {
            Ok(body) => body,
            Err(CallError::Status(e)) => {
                tracing::error!("Failed to fetch Cloudflare Access users: {}", e);
                return Err(AccessFailure::new("Failed to fetch Cloudflare Access users", e));
            }
            Err(CallError::Unexpected(e)) => {
                tracing::error!("Unexpected error fetching Cloudflare Access users: {}", e);
                return Err(AccessFailure::new(UNEXPECTED, e));
            }
        };

        match serde_json::from_value::<AccessUsersResponse>(body) {
            Ok(users) => Ok(users.result),
            Err(e) => {
                tracing::error!("Failed to validate Cloudflare Access users data: {}", e);
                Err(AccessFailure::new(
                    "Failed to validate Cloudflare Access users data",
                    e,
                ))
            }
        }
    }

    async fn replace_group_members(&self, emails: &[String]) -> GroupUpdate {
        let payload = GroupUpdateRequest {
            exclude: vec![],
            include: emails
                .iter()
                .map(|email| EmailRule {
                    email: EmailMatch { email },
                })
                .collect(),
            is_default: false,
            name: &self.group_name,
            require: vec![],
        };

        let request = self
            .http_client
            .put(self.account_url(&format!("/access/groups/{}", self.group_id)))
            .json(&payload);

        match self.call(request).await {
            Ok(body) => {
                tracing::info!(
                    "Replaced members of access group {} ({} emails)",
                    self.group_id,
                    emails.len()
                );
                GroupUpdate::Applied(body)
            }
            Err(CallError::Status(e)) => {
                tracing::error!("Failed to update Cloudflare Access group: {}", e);
                GroupUpdate::failed(AccessFailure::new(
                    "Failed to update Cloudflare Access group",
                    e,
                ))
            }
            Err(CallError::Unexpected(e)) => {
                tracing::error!("Unexpected error updating Cloudflare Access group: {}", e);
                GroupUpdate::failed(AccessFailure::new(UNEXPECTED, e))
            }
        }
    }

    async fn revoke_seat(&self, seat_uid: &str) -> RevokeOutcome {
        let payload = [SeatUpdate {
            access_seat: false,
            gateway_seat: false,
            seat_uid,
        }];

        let request = self
            .http_client
            .patch(self.account_url("/access/seats"))
            .json(&payload);

        let failed_message = format!("Failed to remove seat for user with seat_uid: {}", seat_uid);

        let body = match self.call(request).await {
            Ok(body) => body,
            Err(CallError::Status(e)) => {
                tracing::error!("Failed to remove Cloudflare user seat: {}", e);
                return RevokeOutcome::Error {
                    message: failed_message,
                    errors: None,
                    error_details: Some(e.to_string()),
                };
            }
            Err(CallError::Unexpected(e)) => {
                tracing::error!("Unexpected error removing Cloudflare user seat: {}", e);
                return RevokeOutcome::Error {
                    message: UNEXPECTED.to_string(),
                    errors: None,
                    error_details: Some(e),
                };
            }
        };

        let response: SeatUpdateResponse = match serde_json::from_value(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Unexpected seat update response: {}", e);
                return RevokeOutcome::Error {
                    message: UNEXPECTED.to_string(),
                    errors: None,
                    error_details: Some(e.to_string()),
                };
            }
        };

        if response.success {
            RevokeOutcome::Success {
                message: format!(
                    "Successfully removed seat for user with seat_uid: {}",
                    seat_uid
                ),
                result: response.result,
            }
        } else {
            tracing::warn!("Cloudflare rejected seat removal for {}", seat_uid);
            RevokeOutcome::Error {
                message: failed_message,
                errors: response.errors,
                error_details: None,
            }
        }
    }
}
