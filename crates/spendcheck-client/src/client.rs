//! SpendWise API client implementation.

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ClientError;
use crate::transport;
use crate::types::{ApiResponse, ParseRequest};

/// SpendWise API client.
///
/// Every method sends exactly one request and returns the response whatever
/// its status. Only the parse call uses the long timeout.
#[derive(Debug, Clone)]
pub struct SpendwiseClient {
    client: Client,
    base_url: String,
    parse_timeout: Duration,
    request_timeout: Duration,
}

impl SpendwiseClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Deployment root, without the `/api` suffix (e.g., `"https://spendwise.example.com"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid URL or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let (client, base_url) = transport::build(&base_url.into(), &options.user_agent)?;

        Ok(Self {
            client,
            base_url,
            parse_timeout: Duration::from_secs(options.parse_timeout_seconds),
            request_timeout: Duration::from_secs(options.timeout_seconds),
        })
    }

    /// The API root, e.g. `https://spendwise.example.com/api`.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Timeout applied to the parse call.
    #[must_use]
    pub fn parse_timeout(&self) -> Duration {
        self.parse_timeout
    }

    /// Timeout applied to every other call.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Parse free text into an expense (`POST /api/expenses/parse`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn parse_expense(&self, text: &str) -> Result<ApiResponse, ClientError> {
        let body = serde_json::to_value(ParseRequest {
            text: text.to_string(),
        })?;
        self.send(
            Method::POST,
            "/expenses/parse",
            Some(&body),
            self.parse_timeout,
        )
        .await
    }

    /// Create an expense (`POST /api/expenses`).
    ///
    /// Accepts any serializable body so a parse result can be saved verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or the request cannot be completed.
    #[instrument(skip_all)]
    pub async fn create_expense<T: Serialize + ?Sized>(
        &self,
        expense: &T,
    ) -> Result<ApiResponse, ClientError> {
        let body = serde_json::to_value(expense)?;
        self.send(Method::POST, "/expenses", Some(&body), self.request_timeout)
            .await
    }

    /// List all expenses (`GET /api/expenses`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn list_expenses(&self) -> Result<ApiResponse, ClientError> {
        self.get("/expenses").await
    }

    /// List the last seven days of expenses (`GET /api/expenses/weekly`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn weekly_expenses(&self) -> Result<ApiResponse, ClientError> {
        self.get("/expenses/weekly").await
    }

    /// Fetch weekly statistics (`GET /api/expenses/stats`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn expense_stats(&self) -> Result<ApiResponse, ClientError> {
        self.get("/expenses/stats").await
    }

    /// Delete an expense (`DELETE /api/expenses/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn delete_expense(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.send(
            Method::DELETE,
            &format!("/expenses/{id}"),
            None,
            self.request_timeout,
        )
        .await
    }

    /// Google Sheets connection status (`GET /api/google/status`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn google_status(&self) -> Result<ApiResponse, ClientError> {
        self.get("/google/status").await
    }

    /// Google OAuth consent URL (`GET /api/google/auth`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn google_auth_url(&self) -> Result<ApiResponse, ClientError> {
        self.get("/google/auth").await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, path, None, self.request_timeout)
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<ApiResponse, ClientError> {
        let url = Url::parse(&format!("{}{path}", self.api_base()))
            .map_err(|e| ClientError::Configuration(format!("invalid request URL: {e}")))?;

        transport::execute(&self.client, method, url, &[], body, timeout).await
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Timeout for the AI-backed parse call in seconds (default: 30).
    pub parse_timeout_seconds: u64,
    /// Timeout for every other call in seconds (default: 10).
    pub timeout_seconds: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            parse_timeout_seconds: 30,
            timeout_seconds: 10,
            user_agent: concat!("spendcheck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientOptions {
    /// Options with the given timeouts.
    #[must_use]
    pub fn with_timeouts(parse_timeout_seconds: u64, timeout_seconds: u64) -> Self {
        Self {
            parse_timeout_seconds,
            timeout_seconds,
            ..Self::default()
        }
    }
}
