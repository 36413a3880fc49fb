//! access-sync - mirrors the Chatwoot roster into a Cloudflare Access group
//! and revokes seats of users who left or went inactive.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod response;
pub mod state;
pub mod upstream;

pub use config::Config;
pub use error::{Error, Result};
pub use reconcile::SyncEngine;
pub use state::AppState;
pub use upstream::{AccessControl, ChatwootClient, CloudflareClient, SupportDesk};
