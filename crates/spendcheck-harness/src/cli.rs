//! Command-line interface.

use clap::{Parser, Subcommand};

/// Smoke-test a deployed SpendWise API.
#[derive(Debug, Parser)]
#[command(name = "spendcheck", version, about = "Smoke-test a deployed SpendWise API")]
pub struct Cli {
    /// Deployment root URL, without `/api` [env: SPENDWISE_BASE_URL]
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Timeout for the AI-backed parse call [env: SPENDCHECK_PARSE_TIMEOUT_SECONDS]
    #[arg(long, global = true, value_name = "SECS")]
    pub parse_timeout: Option<u64>,

    /// Timeout for every other request [env: SPENDCHECK_TIMEOUT_SECONDS]
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print response headers and bodies, and enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Suites the harness can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check each API endpoint independently (default)
    Smoke {
        /// Also check the weekly and statistics endpoints
        #[arg(long)]
        extended: bool,
    },
    /// Walk a user through parse, save, verify and Google connection
    Scenario {
        /// Delete the saved expense afterwards
        #[arg(long)]
        cleanup: bool,
    },
    /// Probe the database tables and row level security directly
    Database,
}

impl Cli {
    /// The requested suite, defaulting to a plain smoke run.
    #[must_use]
    pub fn suite(&self) -> Command {
        self.command.unwrap_or(Command::Smoke { extended: false })
    }
}
