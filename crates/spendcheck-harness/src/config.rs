//! Harness configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use spendcheck_client::ClientOptions;

use crate::cli::Cli;
use crate::error::ConfigError;

/// Default deployment under test.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Harness configuration loaded from environment variables and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Deployment root, without `/api` (default: `http://localhost:3000`).
    pub base_url: String,

    /// Timeout for the AI-backed parse call in seconds (default: 30).
    pub parse_timeout_seconds: u64,

    /// Timeout for every other request in seconds (default: 10).
    pub timeout_seconds: u64,

    /// Print response headers and bodies for every exchange.
    pub verbose: bool,

    /// Database endpoint credentials, when available.
    pub database: Option<DatabaseCredentials>,
}

/// PostgREST project URL and anon key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseCredentials {
    /// Project URL.
    pub url: String,
    /// Anonymous API key.
    pub anon_key: String,
}

impl HarnessConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), &default_secret_paths())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, secret_paths: &[PathBuf]) -> Self {
        Self {
            base_url: lookup("SPENDWISE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            parse_timeout_seconds: lookup("SPENDCHECK_PARSE_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            timeout_seconds: lookup("SPENDCHECK_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            verbose: false,
            database: load_database_credentials(&lookup, secret_paths),
        }
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(seconds) = cli.parse_timeout {
            self.parse_timeout_seconds = seconds;
        }
        if let Some(seconds) = cli.timeout {
            self.timeout_seconds = seconds;
        }
        self.verbose |= cli.verbose;
        self
    }

    /// Reject settings no run could succeed with.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or a timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                setting: "base URL",
                reason: "must not be empty".into(),
            });
        }
        if self.parse_timeout_seconds == 0 || self.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                setting: "timeout",
                reason: "must be at least one second".into(),
            });
        }
        Ok(())
    }

    /// Client options derived from this configuration.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::with_timeouts(self.parse_timeout_seconds, self.timeout_seconds)
    }

    /// The API root the checks talk to.
    #[must_use]
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            parse_timeout_seconds: 30,
            timeout_seconds: 10,
            verbose: false,
            database: None,
        }
    }
}

fn default_secret_paths() -> Vec<PathBuf> {
    [
        ".secrets/supabase.json",
        "spendcheck/.secrets/supabase.json",
        "../.secrets/supabase.json",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// Load database credentials from the first readable secrets file, or the environment.
fn load_database_credentials(
    lookup: &impl Fn(&str) -> Option<String>,
    secret_paths: &[PathBuf],
) -> Option<DatabaseCredentials> {
    for path in secret_paths {
        if let Ok(credentials) = load_secrets_file::<DatabaseCredentials>(path) {
            tracing::info!(path = %path.display(), "Loaded database credentials from file");
            return Some(credentials);
        }
    }

    tracing::debug!("Database secrets file not found, using environment variables");
    let url = lookup("SUPABASE_URL").or_else(|| lookup("NEXT_PUBLIC_SUPABASE_URL"))?;
    let anon_key = lookup("SUPABASE_ANON_KEY").or_else(|| lookup("NEXT_PUBLIC_SUPABASE_ANON_KEY"))?;
    Some(DatabaseCredentials { url, anon_key })
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, std::io::Error> {
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = HarnessConfig::from_lookup(lookup(&[]), &[]);
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.api_base(), "http://localhost:3000/api");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = HarnessConfig::from_lookup(
            lookup(&[
                ("SPENDWISE_BASE_URL", "https://spendwise.example.com/"),
                ("SPENDCHECK_PARSE_TIMEOUT_SECONDS", "60"),
                ("SPENDCHECK_TIMEOUT_SECONDS", "not-a-number"),
            ]),
            &[],
        );

        assert_eq!(config.api_base(), "https://spendwise.example.com/api");
        assert_eq!(config.parse_timeout_seconds, 60);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn cli_overrides_environment() {
        let cli = Cli::parse_from([
            "spendcheck",
            "--base-url",
            "http://127.0.0.1:9000",
            "--timeout",
            "3",
            "--verbose",
        ]);
        let config = HarnessConfig::from_lookup(
            lookup(&[("SPENDWISE_BASE_URL", "https://ignored.example.com")]),
            &[],
        )
        .with_cli(&cli);

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.parse_timeout_seconds, 30);
        assert!(config.verbose);
    }

    #[test]
    fn validation_rejects_zero_timeout() {
        let config = HarnessConfig {
            timeout_seconds: 0,
            ..HarnessConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                setting: "timeout",
                ..
            })
        ));
        assert!(HarnessConfig::default().validate().is_ok());
    }

    #[test]
    fn database_credentials_from_public_env_names() {
        let config = HarnessConfig::from_lookup(
            lookup(&[
                ("NEXT_PUBLIC_SUPABASE_URL", "https://db.example.supabase.co"),
                ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "anon"),
            ]),
            &[],
        );
        assert_eq!(
            config.database,
            Some(DatabaseCredentials {
                url: "https://db.example.supabase.co".into(),
                anon_key: "anon".into(),
            })
        );
    }

    #[test]
    fn database_credentials_need_both_values() {
        let config =
            HarnessConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://db.example")]), &[]);
        assert_eq!(config.database, None);
    }

    #[test]
    fn secrets_file_wins_over_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supabase.json");
        std::fs::write(
            &path,
            r#"{"url": "https://from-file.supabase.co", "anon_key": "file-key"}"#,
        )
        .unwrap();

        let config = HarnessConfig::from_lookup(
            lookup(&[
                ("SUPABASE_URL", "https://from-env.supabase.co"),
                ("SUPABASE_ANON_KEY", "env-key"),
            ]),
            &[dir.path().join("missing.json"), path],
        );

        let database = config.database.unwrap();
        assert_eq!(database.url, "https://from-file.supabase.co");
        assert_eq!(database.anon_key, "file-key");
    }

    #[test]
    fn malformed_secrets_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supabase.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_secrets_file::<DatabaseCredentials>(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

        let config = HarnessConfig::from_lookup(lookup(&[]), &[path]);
        assert_eq!(config.database, None);
    }
}
