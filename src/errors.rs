//! Unified error types for screenbook.
//!
//! One crate-wide error enum covers configuration, transport, and session
//! misuse. Local validation violations are NOT errors: they are ordinary
//! values (see `core::validation`) surfaced through notifications.

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing variable, unreadable file, bad value).
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// The HTTP request itself failed (connect, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A body could not be parsed as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable lookup error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The backend answered with an unexpected status code.
    #[error("Backend returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// The backend rejected a submission with structured field errors (422).
    #[error("Order rejected by backend: {}", .errors.join("; "))]
    Rejected {
        /// Field-level error messages, passed through verbatim
        errors: Vec<String>,
    },

    /// The backend reported an internal failure (500).
    #[error("Backend server error: {detail}")]
    Server {
        /// Whatever diagnostic text the backend supplied
        detail: String,
    },

    /// The requested order does not exist on the backend.
    #[error("Order {id} not found")]
    OrderNotFound {
        /// Backend order id
        id: i64,
    },

    /// A screen-requirement row index was out of range.
    #[error("Screen requirement {index} does not exist")]
    RowOutOfRange {
        /// Zero-based row index that was requested
        index: usize,
    },

    /// Refused to remove the last remaining screen-requirement row.
    #[error("An order needs at least one screen requirement")]
    LastScreenRow,

    /// A submission is already in flight for this session.
    #[error("A submission is already in flight")]
    SubmitInFlight,

    /// The session is waiting for the success notice to be acknowledged.
    #[error("The submission result has not been acknowledged yet")]
    AwaitingAcknowledgement,

    /// The session has been closed; its draft is gone.
    #[error("The order session is closed")]
    SessionClosed,
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
