//! The end-to-end user scenario: parse, save, verify, then Google connection.
//!
//! Unlike the smoke suite, steps depend on each other, so the scenario stops
//! at the first failing step.

use std::io::{self, Write};

use serde_json::Value;
use spendcheck_client::{ApiResponse, ClientError, SpendwiseClient};
use spendcheck_core::{
    opaque_id, AuthUrl, CheckReport, Exchange, ExpenseList, ParsedExpense, SheetsStatus, Summary,
};
use tracing::info;

use crate::check::transport_failure;
use crate::report::ConsoleReporter;

/// Text a typical user enters.
pub const SCENARIO_TEXT: &str = "dinner at restaurant 450";

/// Characters of the consent URL shown after a pass.
const URL_PREVIEW_CHARS: usize = 80;

type StepResult<T> = Result<(CheckReport, T), CheckReport>;

/// The user scenario.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scenario {
    cleanup: bool,
}

/// Steps run so far and what they observed.
#[derive(Debug, Clone, Default)]
pub struct ScenarioOutcome {
    /// Step reports in order; the last one is the failure, if any.
    pub steps: Vec<CheckReport>,
    /// Google connection state, once the status step passed.
    pub connected: Option<bool>,
}

impl ScenarioOutcome {
    /// Summary over the steps that ran.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_reports(&self.steps)
    }

    fn record<T, W: Write>(
        &mut self,
        reporter: &mut ConsoleReporter<W>,
        step: StepResult<T>,
    ) -> io::Result<Option<T>> {
        let (report, value) = match step {
            Ok((report, value)) => (report, Some(value)),
            Err(report) => (report, None),
        };
        reporter.step(&report)?;
        self.steps.push(report);
        Ok(value)
    }
}

impl Scenario {
    /// A scenario that optionally deletes the saved expense at the end.
    #[must_use]
    pub fn new(cleanup: bool) -> Self {
        Self { cleanup }
    }

    /// Run the scenario, reporting each step as it completes.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to the reporter fails.
    pub async fn run<W: Write>(
        &self,
        client: &SpendwiseClient,
        reporter: &mut ConsoleReporter<W>,
    ) -> io::Result<ScenarioOutcome> {
        let mut outcome = ScenarioOutcome::default();
        info!(cleanup = self.cleanup, "running user scenario");

        reporter.line("🔍 TESTING USER SCENARIO")?;
        reporter.rule()?;
        reporter.line(&format!("Testing API at: {}", client.api_base()))?;
        reporter.line("")?;

        reporter.line("1. Testing expense parsing and saving workflow...")?;
        let Some(parsed) = outcome.record(reporter, parse(client).await)? else {
            return finish(outcome, reporter);
        };
        let Some(expense_id) = outcome.record(reporter, save(client, &parsed).await)? else {
            return finish(outcome, reporter);
        };
        if outcome
            .record(reporter, verify(client, &expense_id).await)?
            .is_none()
        {
            return finish(outcome, reporter);
        }

        reporter.line("")?;
        reporter.line("2. Testing Google Sheets integration...")?;
        let Some(connected) = outcome.record(reporter, status(client).await)? else {
            return finish(outcome, reporter);
        };
        outcome.connected = Some(connected);
        if outcome.record(reporter, auth(client).await)?.is_none() {
            return finish(outcome, reporter);
        }

        if self.cleanup {
            reporter.line("")?;
            reporter.line("3. Cleaning up...")?;
            outcome.record(reporter, cleanup(client, &expense_id).await)?;
        }

        finish(outcome, reporter)
    }
}

fn finish<W: Write>(
    outcome: ScenarioOutcome,
    reporter: &mut ConsoleReporter<W>,
) -> io::Result<ScenarioOutcome> {
    reporter.line("")?;

    if outcome.summary().all_passed() {
        reporter.line("📊 USER SCENARIO ANALYSIS:")?;
        reporter.rule()?;
        reporter.line("✅ Expenses are being saved correctly")?;
        reporter.line("   - Expense parsing works (AI integration)")?;
        reporter.line("   - Expense creation works (database integration)")?;
        reporter.line("   - Expense retrieval works (data persistence confirmed)")?;
        reporter.line("")?;
        reporter.line("✅ Google Sheets integration is reachable")?;
        reporter.line("   - Connection status API works")?;
        reporter.line("   - OAuth URL generation works")?;
        let state = match outcome.connected {
            Some(true) => "Connected",
            _ => "Not connected (the user needs to authenticate with Google)",
        };
        reporter.line(&format!("   - Current status: {state}"))?;
        reporter.line("")?;
        reporter.line("🎉 All scenario steps passed!")?;
    } else {
        reporter.line("⚠️ Some issues still exist")?;
    }

    Ok(outcome)
}

async fn parse(client: &SpendwiseClient) -> StepResult<Value> {
    const NAME: &str = "Parse expense";
    let response = client
        .parse_expense(SCENARIO_TEXT)
        .await
        .map_err(|err| unreachable_step(NAME, &err))?;
    let (body, exchange) = expect_json(NAME, response, 200, "Parse")?;

    match ParsedExpense::from_value(&body) {
        Ok(parsed) => Ok((
            CheckReport::pass(
                NAME,
                format!(
                    "Parsed: ₹{} - {} ({})",
                    parsed.amount, parsed.description, parsed.category
                ),
            )
            .with_exchanges(vec![exchange]),
            body,
        )),
        Err(err) => Err(CheckReport::fail(NAME, err.to_string()).with_exchanges(vec![exchange])),
    }
}

async fn save(client: &SpendwiseClient, parsed: &Value) -> StepResult<String> {
    const NAME: &str = "Save expense";
    let response = client
        .create_expense(parsed)
        .await
        .map_err(|err| unreachable_step(NAME, &err))?;
    let (body, exchange) = expect_json(NAME, response, 201, "Save")?;

    match body.get("expense").and_then(|expense| expense.get("id")) {
        Some(id) => {
            let id = opaque_id(id);
            Ok((
                CheckReport::pass(NAME, format!("Expense saved with ID: {id}"))
                    .with_exchanges(vec![exchange]),
                id,
            ))
        }
        None => Err(
            CheckReport::fail(NAME, "Missing 'expense.id' in response")
                .with_exchanges(vec![exchange]),
        ),
    }
}

async fn verify(client: &SpendwiseClient, expense_id: &str) -> StepResult<()> {
    const NAME: &str = "Verify saved expense";
    let response = client
        .list_expenses()
        .await
        .map_err(|err| unreachable_step(NAME, &err))?;
    let (body, exchange) = expect_json(NAME, response, 200, "Retrieve")?;

    let report = match ExpenseList::from_response(&body) {
        Ok(list) if list.contains_id(expense_id) => CheckReport::pass(
            NAME,
            format!(
                "Expense verified in database (found in list of {} expenses)",
                list.len()
            ),
        ),
        Ok(_) => CheckReport::fail(NAME, "Saved expense not found in expense list!"),
        Err(err) => CheckReport::fail(NAME, err.to_string()),
    };

    conclude(report.with_exchanges(vec![exchange]), ())
}

async fn status(client: &SpendwiseClient) -> StepResult<bool> {
    const NAME: &str = "Google Sheets status";
    let response = client
        .google_status()
        .await
        .map_err(|err| unreachable_step(NAME, &err))?;
    let (body, exchange) = expect_json(NAME, response, 200, "Status check")?;

    match SheetsStatus::from_response(&body) {
        Ok(status) => Ok((
            CheckReport::pass(
                NAME,
                format!("Google Sheets connected: {}", status.connected),
            )
            .with_exchanges(vec![exchange]),
            status.connected,
        )),
        Err(err) => Err(CheckReport::fail(NAME, err.to_string()).with_exchanges(vec![exchange])),
    }
}

async fn auth(client: &SpendwiseClient) -> StepResult<()> {
    const NAME: &str = "Google OAuth URL";
    let response = client
        .google_auth_url()
        .await
        .map_err(|err| unreachable_step(NAME, &err))?;
    let (body, exchange) = expect_json(NAME, response, 200, "OAuth URL generation")?;

    let report = match AuthUrl::extract(&body) {
        Ok(url) if url.is_google_accounts() => {
            CheckReport::pass(NAME, "OAuth URL available for Google connection")
                .with_info(format!("URL: {}...", url.preview(URL_PREVIEW_CHARS)))
        }
        Ok(url) => CheckReport::fail(NAME, format!("Invalid OAuth URL: {}", url.as_str())),
        Err(err) => CheckReport::fail(NAME, err.to_string()),
    };

    conclude(report.with_exchanges(vec![exchange]), ())
}

async fn cleanup(client: &SpendwiseClient, expense_id: &str) -> StepResult<()> {
    const NAME: &str = "Delete expense";
    let response = client
        .delete_expense(expense_id)
        .await
        .map_err(|err| unreachable_step(NAME, &err))?;
    let (_, exchange) = expect_json(NAME, response, 200, "Delete")?;

    conclude(
        CheckReport::pass(NAME, format!("Deleted expense {expense_id}"))
            .with_exchanges(vec![exchange]),
        (),
    )
}

fn expect_json(
    name: &str,
    response: ApiResponse,
    expected: u16,
    action: &str,
) -> Result<(Value, Exchange), CheckReport> {
    if response.status() != expected {
        let detail = format!(
            "{action} failed: {} - {}",
            response.status(),
            response.body()
        );
        return Err(CheckReport::fail(name, detail).with_exchanges(vec![response.into_exchange()]));
    }

    match response.json() {
        Ok(body) => Ok((body, response.into_exchange())),
        Err(err) => Err(CheckReport::fail(name, format!("Unexpected error: {err}"))
            .with_exchanges(vec![response.into_exchange()])),
    }
}

fn conclude<T>(report: CheckReport, value: T) -> StepResult<T> {
    if report.passed() {
        Ok((report, value))
    } else {
        Err(report)
    }
}

fn unreachable_step(name: &str, err: &ClientError) -> CheckReport {
    CheckReport::fail(name, transport_failure(err, ""))
}
