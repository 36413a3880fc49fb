//! Chatwoot platform API client.

use access_sync_common::{ChatwootUser, ChatwootUserDetails, RosterResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use super::SupportDesk;
use crate::config::ChatwootConfig;
use crate::error::{Error, Result};

const SERVICE: &str = "Chatwoot";

/// Chatwoot client authenticated with a platform app token.
pub struct ChatwootClient {
    http_client: Client,
    base_url: String,
    account_id: String,
    api_key: String,
}

impl ChatwootClient {
    pub fn new(config: &ChatwootConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Build on an existing client so connections can be shared.
    pub fn with_client(http_client: Client, config: &ChatwootConfig) -> Self {
        Self {
            http_client,
            base_url: config.url.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client
            .get(format!("{}{}", self.base_url, path))
            .header("api_access_token", &self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| Error::Communication {
            service: SERVICE,
            message: e.to_string(),
        })
    }
}

async fn upstream_error(what: String, response: Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Error::Upstream { what, status, body }
}

fn invalid_response(e: reqwest::Error) -> Error {
    Error::InvalidResponse {
        service: SERVICE,
        message: e.to_string(),
    }
}

#[async_trait]
impl SupportDesk for ChatwootClient {
    async fn fetch_roster(&self) -> Result<Vec<ChatwootUser>> {
        let path = format!("/platform/api/v1/accounts/{}/account_users", self.account_id);
        tracing::debug!("Fetching Chatwoot roster: {}", path);

        let response = self.send(self.get(&path)).await?;
        if response.status() != StatusCode::OK {
            return Err(upstream_error("Failed to fetch Chatwoot users".to_string(), response).await);
        }

        let roster: RosterResponse = response.json().await.map_err(invalid_response)?;
        Ok(roster.into_users())
    }

    async fn fetch_user_details(&self, user: &mut ChatwootUser) -> Result<()> {
        let path = format!("/platform/api/v1/users/{}", user.user_id);
        let response = self.send(self.get(&path)).await?;

        match response.status() {
            StatusCode::OK => {
                let details: ChatwootUserDetails = response.json().await.map_err(invalid_response)?;
                user.details = Some(details);
            }
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => {
                tracing::debug!(
                    "No profile for Chatwoot user {} ({})",
                    user.user_id,
                    response.status()
                );
                user.details = None;
            }
            _ => {
                let what = format!("Failed to fetch details for user {}", user.user_id);
                return Err(upstream_error(what, response).await);
            }
        }

        Ok(())
    }
}
