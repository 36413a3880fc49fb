//! Configuration for the sync service.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure.
///
/// Read once at startup and handed to the engine; never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub chatwoot: ChatwootConfig,
    pub cloudflare: CloudflareConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Chatwoot platform API access.
#[derive(Clone, Deserialize)]
pub struct ChatwootConfig {
    /// Installation base URL, e.g. `https://chat.example.com`.
    pub url: String,
    pub account_id: String,
    /// Platform app `api_access_token`.
    pub api_key: String,
}

impl std::fmt::Debug for ChatwootConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatwootConfig")
            .field("url", &self.url)
            .field("account_id", &self.account_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Cloudflare Access API access.
#[derive(Clone, Deserialize)]
pub struct CloudflareConfig {
    #[serde(default = "default_cloudflare_api_base")]
    pub api_base: String,
    pub api_token: String,
    pub account_id: String,
    pub access_group_id: String,
    pub access_group_name: String,
}

impl std::fmt::Debug for CloudflareConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareConfig")
            .field("api_base", &self.api_base)
            .field("api_token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .field("access_group_id", &self.access_group_id)
            .field("access_group_name", &self.access_group_name)
            .finish()
    }
}

/// Reconciliation policy knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Seats whose last login is older than this many days are revoked.
    #[serde(default = "default_inactivity_days")]
    pub inactivity_days_threshold: u32,
    /// Only roster rows with this `account_id` count as current users.
    #[serde(default = "default_canonical_account_id")]
    pub canonical_account_id: i64,
    /// Return full reports and error details instead of a bare status.
    #[serde(default)]
    pub debug: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            inactivity_days_threshold: default_inactivity_days(),
            canonical_account_id: default_canonical_account_id(),
            debug: false,
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_cloudflare_api_base() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}
fn default_inactivity_days() -> u32 {
    7
}
fn default_canonical_account_id() -> i64 {
    1
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (ACCESS_SYNC__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            File::with_name("config").required(false),
            Environment::with_prefix("ACCESS_SYNC").separator("__"),
        )
    }

    fn load_from(
        file: File<config::FileSourceFile, config::FileFormat>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("cloudflare.api_base", default_cloudflare_api_base())?
            .set_default("sync.inactivity_days_threshold", default_inactivity_days() as i64)?
            .set_default("sync.canonical_account_id", default_canonical_account_id())?
            .set_default("sync.debug", false)?
            .add_source(file)
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }
}
