//! SpendWise API smoke-test harness.
//!
//! Three suites run against a deployment:
//! - **smoke**: every endpoint checked independently
//! - **scenario**: the parse, save, verify and Google connection flow a user goes through
//! - **database**: direct PostgREST probes of the tables behind the API

pub mod check;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scenario;

use std::io::Write;
use std::time::Duration;

use spendcheck_client::{PostgrestClient, SpendwiseClient};
use spendcheck_core::Summary;

pub use check::{run_checks, BoxedCheck, Check};
pub use cli::{Cli, Command};
pub use config::{DatabaseCredentials, HarnessConfig};
pub use error::{ConfigError, HarnessError};
pub use report::ConsoleReporter;
pub use scenario::{Scenario, ScenarioOutcome};

/// Run the suite selected by `command` and return its summary.
///
/// Check failures are part of the summary, not errors.
///
/// # Errors
///
/// Returns an error if the configuration is unusable, a client cannot be
/// built, or writing the report fails.
pub async fn run<W: Write>(
    config: &HarnessConfig,
    command: Command,
    reporter: &mut ConsoleReporter<W>,
) -> Result<Summary, HarnessError> {
    config.validate()?;

    match command {
        Command::Smoke { extended } => {
            let client = SpendwiseClient::with_options(&config.base_url, config.client_options())?;
            let checks = checks::smoke_suite(extended);
            tracing::info!(api = %client.api_base(), checks = checks.len(), "Starting smoke suite");

            reporter.suite_header("Testing SpendWise API Endpoints", &client.api_base())?;
            let summary = run_checks(&checks, &client, reporter).await?;
            reporter.summary(&summary)?;
            Ok(summary)
        }
        Command::Scenario { cleanup } => {
            let client = SpendwiseClient::with_options(&config.base_url, config.client_options())?;
            let outcome = Scenario::new(cleanup).run(&client, reporter).await?;
            Ok(outcome.summary())
        }
        Command::Database => {
            let credentials = config
                .database
                .as_ref()
                .ok_or(ConfigError::MissingDatabaseCredentials)?;
            let client = PostgrestClient::new(
                &credentials.url,
                &credentials.anon_key,
                Duration::from_secs(config.timeout_seconds),
            )?;
            let checks = checks::database_suite();
            tracing::info!(url = %credentials.url, "Starting database suite");

            reporter.suite_header("Testing SpendWise Database", &credentials.url)?;
            let summary = run_checks(&checks, &client, reporter).await?;
            reporter.summary(&summary)?;
            Ok(summary)
        }
    }
}
