//! spendcheck - smoke tests for a deployed SpendWise API.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendcheck_harness::{run, Cli, ConsoleReporter, HarnessConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "warn,spendcheck=debug,spendcheck_harness=debug,spendcheck_client=debug"
    } else {
        "warn,spendcheck=info,spendcheck_harness=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = HarnessConfig::from_env().with_cli(&cli);
    tracing::debug!(
        base_url = %config.base_url,
        parse_timeout_seconds = config.parse_timeout_seconds,
        timeout_seconds = config.timeout_seconds,
        database_configured = config.database.is_some(),
        "Configuration loaded"
    );

    let mut reporter = ConsoleReporter::stdout(config.verbose);
    match run(&config, cli.suite(), &mut reporter).await {
        Ok(summary) if summary.all_passed() => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::info!(
                passed = summary.passed(),
                total = summary.total(),
                "Suite finished with failures"
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "Run aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
