//! Classification of unsuccessful HTTP responses.

use std::fmt;

/// Prefix of PostgREST error codes, as surfaced by the SpendWise backend.
pub const DATABASE_ERROR_MARKER: &str = "PGRST";

/// Likely cause of an unsuccessful response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    /// The backing database rejected the operation.
    Storage,
    /// HTTP 401.
    Authentication,
    /// HTTP 400.
    Validation,
    /// Anything else.
    Http,
}

impl Diagnosis {
    /// Classify a response by status code and body.
    ///
    /// A database error code in the body wins over the status code.
    #[must_use]
    pub fn classify(status: u16, body: &str) -> Self {
        if body.contains(DATABASE_ERROR_MARKER) {
            Self::Storage
        } else if status == 401 {
            Self::Authentication
        } else if status == 400 {
            Self::Validation
        } else {
            Self::Http
        }
    }

    /// Failure detail for a response with this diagnosis.
    #[must_use]
    pub fn describe(self, status: u16, body: &str) -> String {
        match self {
            Self::Http => format!("HTTP {status}: {body}"),
            other => format!("{other}: {body}"),
        }
    }

    /// Classify and describe in one step.
    #[must_use]
    pub fn explain(status: u16, body: &str) -> String {
        Self::classify(status, body).describe(status, body)
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage => write!(f, "Database error"),
            Self::Authentication => write!(f, "Authentication error"),
            Self::Validation => write!(f, "Validation error"),
            Self::Http => write!(f, "HTTP error"),
        }
    }
}
