//! Sync trigger endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;

use crate::response;
use crate::state::AppState;

/// GET / - run one reconciliation and report it.
///
/// Always answers with JSON: 200 with the (debug-gated) report, or 500 with
/// the (debug-gated) error body.
pub async fn run_sync(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("Sync run requested");
    let result = state.engine.run().await;
    response::into_response(result, state.debug())
}
