//! Harness error types.

use spendcheck_client::ClientError;

/// Errors that stop a run before or outside the checks themselves.
///
/// Failures inside a check never surface here; they become FAIL reports.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Invalid or incomplete configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(#[from] ClientError),

    /// Writing the console report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The database suite was requested without credentials.
    #[error(
        "database credentials missing: set SUPABASE_URL and SUPABASE_ANON_KEY \
         or provide .secrets/supabase.json"
    )]
    MissingDatabaseCredentials,

    /// A setting has an unusable value.
    #[error("invalid {setting}: {reason}")]
    Invalid {
        /// Setting name.
        setting: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}
