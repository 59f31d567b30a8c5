//! Request and response types for the SpendWise clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use spendcheck_core::Exchange;

use crate::error::ClientError;

/// Body of `POST /api/expenses/parse`.
#[derive(Debug, Clone, Serialize)]
pub struct ParseRequest {
    /// Free-text expense description, e.g. `"coffee 80"`.
    pub text: String,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    exchange: Exchange,
}

impl ApiResponse {
    pub(crate) fn new(exchange: Exchange) -> Self {
        Self { exchange }
    }

    /// Response status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.exchange.status
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.exchange.status)
    }

    /// Raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.exchange.body
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_str(&self.exchange.body)?)
    }

    /// The recorded exchange.
    #[must_use]
    pub fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    /// Consume the response, keeping the recorded exchange.
    #[must_use]
    pub fn into_exchange(self) -> Exchange {
        self.exchange
    }
}

/// Error body returned by PostgREST.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostgrestError {
    /// Error code, e.g. `PGRST205` or a SQLSTATE such as `42501`.
    pub code: Option<String>,
    /// Error message.
    pub message: String,
    /// Additional details.
    pub details: Option<String>,
    /// Suggested fix.
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Code PostgREST uses when a table is missing from its schema cache.
    pub const TABLE_NOT_FOUND: &'static str = "PGRST205";

    /// SQLSTATE raised when a row level security policy rejects a write.
    pub const INSUFFICIENT_PRIVILEGE: &'static str = "42501";

    /// Parse an error body, if it is one.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Whether the error carries the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}
