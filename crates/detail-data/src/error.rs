//! HTTP client error types.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No response was received.
    #[error("Network unavailable: {0}")]
    Network(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// 401 from the server. The local session is no longer valid.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// 5xx from the server.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Any other non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Failed to encode the request body.
    #[error("JSON error: {0}")]
    Json(String),
}

/// Coarse classification of a [`FetchError`], cheap to copy into results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Network,
    Timeout,
    Unauthorized,
    Server,
    Http,
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Timeout => "timeout",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::Server => "server",
            FailureKind::Http => "http",
            FailureKind::Parse => "parse",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Network(_) | FetchError::InvalidUrl(_) => FailureKind::Network,
            FetchError::Timeout(_) => FailureKind::Timeout,
            FetchError::Unauthorized { .. } => FailureKind::Unauthorized,
            FetchError::Server { .. } => FailureKind::Server,
            FetchError::Http { .. } => FailureKind::Http,
            FetchError::Parse(_) | FetchError::Json(_) => FailureKind::Parse,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized { .. })
    }

    /// HTTP status, for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Unauthorized { .. } => Some(401),
            FetchError::Server { status, .. } | FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}
