//! Response shaping for sync runs.
//!
//! Outside debug mode nothing but the status ever leaves the service.

use access_sync_common::{Status, SyncReport};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::{Error, Result};

pub fn success_body(report: &SyncReport, debug: bool) -> Value {
    if debug {
        serde_json::to_value(report).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize sync report: {}", e);
            json!({ "status": Status::Success })
        })
    } else {
        json!({ "status": Status::Success })
    }
}

pub fn error_body(error: &Error, debug: bool) -> Value {
    if debug {
        json!({
            "status": Status::Error,
            "message": "An unexpected error occurred",
            "error_details": error.to_string(),
        })
    } else {
        json!({ "status": Status::Error })
    }
}

/// Turn a finished run into the HTTP response, logging failures once here.
pub fn into_response(result: Result<SyncReport>, debug: bool) -> Response {
    match result {
        Ok(report) => (StatusCode::OK, Json(success_body(&report, debug))).into_response(),
        Err(e) => {
            tracing::error!("Sync run failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error_body(&e, debug))).into_response()
        }
    }
}
