//! Expense endpoint checks.

use async_trait::async_trait;
use spendcheck_client::SpendwiseClient;
use spendcheck_core::{
    opaque_id, CheckReport, CreatedExpense, ExpenseList, ExpenseStats, NewExpense, ParsedExpense,
};

use crate::check::{judge, transport_failure, Check};

/// Text sent to the parse endpoint by the smoke suite.
pub const PARSE_SAMPLE_TEXT: &str = "coffee 80";

const PARSE_TIMEOUT_HINT: &str = " - AI parsing service might be slow";

/// `POST /api/expenses/parse` turns free text into a complete expense.
#[derive(Debug, Default)]
pub struct ParseExpense;

#[async_trait]
impl Check for ParseExpense {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Expense Parsing (AI)"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.parse_expense(PARSE_SAMPLE_TEXT).await {
            Ok(response) => judge(name, 200, response, |body| {
                let parsed = ParsedExpense::from_value(body)?;
                Ok(CheckReport::pass(
                    name,
                    format!(
                        "Parsed: ₹{} for {} ({})",
                        parsed.amount, parsed.description, parsed.category
                    ),
                ))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, PARSE_TIMEOUT_HINT)),
        }
    }
}

/// `POST /api/expenses` stores an expense and echoes the full record.
#[derive(Debug, Default)]
pub struct CreateExpense;

#[async_trait]
impl Check for CreateExpense {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Expense Creation"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.create_expense(&NewExpense::sample()).await {
            Ok(response) => judge(name, 201, response, |body| {
                let created = CreatedExpense::from_response(body)?;
                Ok(CheckReport::pass(
                    name,
                    format!("Created expense ID: {}", created.id),
                ))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, "")),
        }
    }
}

/// `GET /api/expenses` returns a list of expenses.
#[derive(Debug, Default)]
pub struct ListExpenses;

#[async_trait]
impl Check for ListExpenses {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Get Expenses"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.list_expenses().await {
            Ok(response) => judge(name, 200, response, |body| {
                let list = ExpenseList::from_response(body)?;
                let report =
                    CheckReport::pass(name, format!("Retrieved {} expenses", list.len()));
                Ok(annotate_first(report, &list))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, "")),
        }
    }
}

/// `GET /api/expenses/weekly` returns the last seven days of expenses.
#[derive(Debug, Default)]
pub struct WeeklyExpenses;

#[async_trait]
impl Check for WeeklyExpenses {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Weekly Expenses"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.weekly_expenses().await {
            Ok(response) => judge(name, 200, response, |body| {
                let list = ExpenseList::from_response(body)?;
                Ok(CheckReport::pass(
                    name,
                    format!("Retrieved {} expenses from the last 7 days", list.len()),
                ))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, "")),
        }
    }
}

/// `GET /api/expenses/stats` returns weekly totals and a category breakdown.
#[derive(Debug, Default)]
pub struct ExpenseStatistics;

#[async_trait]
impl Check for ExpenseStatistics {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Expense Stats"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.expense_stats().await {
            Ok(response) => judge(name, 200, response, |body| {
                let stats = ExpenseStats::from_response(body)?;
                Ok(CheckReport::pass(
                    name,
                    format!(
                        "This week: ₹{} across {} expenses ({:+}% vs last week, {} categories)",
                        stats.this_week_total,
                        stats.this_week_count,
                        stats.percentage_change,
                        stats.category_breakdown.len()
                    ),
                ))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, "")),
        }
    }
}

/// Warn about an incomplete first record, or show it as a sample.
fn annotate_first(report: CheckReport, list: &ExpenseList) -> CheckReport {
    let Some(first) = list.items.first() else {
        return report;
    };

    let missing = list.first_missing_fields();
    if missing.is_empty() {
        report.with_info(format!(
            "Sample expense: ₹{} - {}",
            opaque_id(&first["amount"]),
            opaque_id(&first["description"])
        ))
    } else {
        report.with_warning(format!("Expense missing fields: {missing:?}"))
    }
}
