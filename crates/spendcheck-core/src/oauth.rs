//! Google Sheets connection status and OAuth consent URL.

use serde_json::Value;

use crate::error::{Result, ShapeError};

/// Host every Google consent URL must point at.
pub const GOOGLE_ACCOUNTS_HOST: &str = "accounts.google.com";

/// Path marker of the Google OAuth 2.0 endpoint.
pub const OAUTH2_MARKER: &str = "oauth2";

/// Response of `GET /api/google/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsStatus {
    /// Whether the user has connected a Google account.
    pub connected: bool,
    /// Spreadsheet the expenses are exported to, once one exists.
    pub sheet_id: Option<String>,
}

impl SheetsStatus {
    /// Validate a status response.
    ///
    /// # Errors
    ///
    /// Returns an error if `connected` is absent or not a boolean.
    pub fn from_response(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;
        let connected = object
            .get("connected")
            .ok_or(ShapeError::MissingField { field: "connected" })?
            .as_bool()
            .ok_or(ShapeError::NotABoolean { field: "Connected" })?;

        let sheet_id = match object.get("sheetId") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            connected,
            sheet_id,
        })
    }

    /// Human-readable status, e.g. `Connected (Sheet ID: abc)`.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.connected, &self.sheet_id) {
            (true, Some(id)) => format!("Connected (Sheet ID: {id})"),
            (true, None) => "Connected".to_string(),
            (false, _) => "Not connected".to_string(),
        }
    }
}

/// A Google OAuth consent URL issued by `GET /api/google/auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUrl(String);

impl AuthUrl {
    /// Extract `authUrl` from a response body without judging it.
    ///
    /// # Errors
    ///
    /// Returns an error if `authUrl` is absent or not a string.
    pub fn extract(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;
        match object.get("authUrl") {
            None => Err(ShapeError::MissingField { field: "authUrl" }),
            Some(Value::String(url)) => Ok(Self(url.clone())),
            Some(other) => Err(ShapeError::InvalidAuthUrl(other.to_string())),
        }
    }

    /// Extract `authUrl` and require a secure Google OAuth 2.0 consent URL.
    ///
    /// The URL must start with `https://` and contain both
    /// [`GOOGLE_ACCOUNTS_HOST`] and [`OAUTH2_MARKER`].
    ///
    /// # Errors
    ///
    /// Returns an error describing the first rule the URL breaks.
    pub fn from_response(value: &Value) -> Result<Self> {
        let url = Self::extract(value)?;
        url.validate()?;
        Ok(url)
    }

    /// Check the URL against the Google consent endpoint rules.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first rule the URL breaks.
    pub fn validate(&self) -> Result<()> {
        if !self.0.starts_with("https://") {
            return Err(ShapeError::InvalidAuthUrl(self.0.clone()));
        }
        if !self.is_google_accounts() || !self.0.contains(OAUTH2_MARKER) {
            return Err(ShapeError::NotGoogleOAuth(self.0.clone()));
        }
        Ok(())
    }

    /// Whether the URL mentions the Google accounts host.
    #[must_use]
    pub fn is_google_accounts(&self) -> bool {
        self.0.contains(GOOGLE_ACCOUNTS_HOST)
    }

    /// The URL text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `max_chars` characters of the URL.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}
