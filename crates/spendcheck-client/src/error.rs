//! Client error types.

use std::time::Duration;

/// Errors that can occur when talking to SpendWise.
///
/// Only transport-level problems are errors; any HTTP status, including 5xx,
/// comes back as a successful [`ApiResponse`](crate::ApiResponse).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request did not complete within its timeout.
    #[error("request timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The server could not be reached.
    #[error("connection error: {0}")]
    Connect(#[source] reqwest::Error),

    /// Any other HTTP-level failure.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// A body could not be encoded or decoded as JSON.
    #[error("invalid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Classify a `reqwest` failure for a request sent with `timeout`.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout }
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Http(err)
        }
    }

    /// Whether the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Whether the server was unreachable.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connect(_))
    }
}
