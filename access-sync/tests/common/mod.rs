//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use access_sync::config::{
    ChatwootConfig, CloudflareConfig, Config, LoggingConfig, ServerConfig, SyncConfig,
};
use serde_json::{json, Value};

pub const CHATWOOT_KEY: &str = "cw-key";
pub const CF_TOKEN: &str = "cf-token";
pub const CF_ACCOUNT: &str = "cf-acc";
pub const CF_GROUP: &str = "grp-1";

pub fn test_config(chatwoot_url: &str, cloudflare_url: &str, debug: bool) -> Config {
    Config {
        server: ServerConfig::default(),
        logging: LoggingConfig::default(),
        chatwoot: ChatwootConfig {
            url: chatwoot_url.to_string(),
            account_id: "1".to_string(),
            api_key: CHATWOOT_KEY.to_string(),
        },
        cloudflare: CloudflareConfig {
            api_base: cloudflare_url.to_string(),
            api_token: CF_TOKEN.to_string(),
            account_id: CF_ACCOUNT.to_string(),
            access_group_id: CF_GROUP.to_string(),
            access_group_name: "Support agents".to_string(),
        },
        sync: SyncConfig {
            debug,
            ..SyncConfig::default()
        },
    }
}

pub fn roster_user(id: i64, account_id: i64, user_id: i64) -> Value {
    json!({
        "id": id,
        "account_id": account_id,
        "user_id": user_id,
        "role": "agent",
        "inviter_id": null,
        "created_at": "2024-01-10T08:00:00.000Z",
        "updated_at": "2024-01-10T08:00:00.000Z",
        "active_at": null,
        "availability": "online",
        "auto_offline": true
    })
}

pub fn profile(user_id: i64, email: &str, name: &str) -> Value {
    json!({
        "id": user_id,
        "uid": email,
        "name": name,
        "available_name": name,
        "display_name": null,
        "email": email,
        "account_id": 1,
        "role": "agent",
        "confirmed": true,
        "custom_attributes": {},
        "accounts": [{"id": 1, "name": "Support"}]
    })
}

pub fn access_user(email: &str, last_login: Option<&str>, access_seat: bool, gateway_seat: bool) -> Value {
    let name = email.split('@').next().unwrap_or(email);
    json!({
        "id": format!("cf-{}", name),
        "created_at": "2023-11-01T00:00:00Z",
        "updated_at": "2023-11-01T00:00:00Z",
        "uid": format!("uid-{}", name),
        "name": name,
        "email": email,
        "last_successful_login": last_login,
        "access_seat": access_seat,
        "gateway_seat": gateway_seat,
        "seat_uid": format!("seat-{}", name)
    })
}

pub fn envelope(result: Value) -> Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}
