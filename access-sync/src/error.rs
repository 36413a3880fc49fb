//! Error types for the sync service.

/// Errors that abort a sync run.
///
/// Cloudflare calls never produce these directly; they report failures as
/// values and the engine decides which of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{what}. Status: {status}, Response: {body}")]
    Upstream {
        what: String,
        status: u16,
        body: String,
    },

    #[error("Request to {service} failed: {message}")]
    Communication {
        service: &'static str,
        message: String,
    },

    #[error("Invalid response from {service}: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    #[error("{0}")]
    SeatListUnavailable(String),

    #[error("Unrecognized last_successful_login value for {email}: {value}")]
    InvalidTimestamp { email: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
