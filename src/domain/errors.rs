//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these; the HTTP adapter maps them
//! onto status codes.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Required configuration (e.g. the provider credential) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed request input. Raised before any outbound call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream request timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream connection failed: {0}")]
    UpstreamConnection(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("Unexpected upstream error: {0}")]
    UpstreamUnexpected(String),

    /// Model load or inference failure. Absorbed by the NLU pipeline, never
    /// returned to HTTP callers.
    #[error("NLU failure: {0}")]
    Nlu(String),

    /// Terminal prompt failure or user interrupt in the dashboard.
    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
