//! access-sync server - triggers a reconciliation on `GET /`.

use std::env;
use std::sync::Arc;

use access_sync::{api, logging, AppState, ChatwootClient, CloudflareClient, Config, SyncEngine};
use tokio::net::TcpListener;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("access-sync {}", VERSION);
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Make sure config.toml exists or set ACCESS_SYNC__CHATWOOT__* and ACCESS_SYNC__CLOUDFLARE__* environment variables.",
            e
        )
    })?;

    logging::init(&config.logging.level);
    tracing::info!(
        "Starting access-sync: Chatwoot {} -> Cloudflare group {}",
        config.chatwoot.url,
        config.cloudflare.access_group_name
    );

    // One connection pool for both platforms
    let http_client = reqwest::Client::new();
    let chatwoot = Arc::new(ChatwootClient::with_client(http_client.clone(), &config.chatwoot));
    let cloudflare = Arc::new(CloudflareClient::with_client(http_client, &config.cloudflare));
    let engine = SyncEngine::new(chatwoot, cloudflare, config.sync.clone());

    let state = Arc::new(AppState::new(config.clone(), engine));
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
