//! Individual checks and the suites built from them.

mod database;
mod expenses;
mod google;

pub use database::{InsertPolicy, TableAccess, MOCK_USER_ID};
pub use expenses::{
    CreateExpense, ExpenseStatistics, ListExpenses, ParseExpense, WeeklyExpenses,
    PARSE_SAMPLE_TEXT,
};
pub use google::{OAuthUrl, SheetsConnection};

use spendcheck_client::{PostgrestClient, SpendwiseClient};

use crate::check::BoxedCheck;

/// Endpoint checks in run order; `extended` adds the weekly and statistics endpoints.
#[must_use]
pub fn smoke_suite(extended: bool) -> Vec<BoxedCheck<SpendwiseClient>> {
    let mut checks: Vec<BoxedCheck<SpendwiseClient>> = vec![
        Box::new(ParseExpense),
        Box::new(CreateExpense),
        Box::new(ListExpenses),
        Box::new(SheetsConnection),
        Box::new(OAuthUrl),
    ];

    if extended {
        checks.push(Box::new(WeeklyExpenses));
        checks.push(Box::new(ExpenseStatistics));
    }

    checks
}

/// Database probes in run order.
#[must_use]
pub fn database_suite() -> Vec<BoxedCheck<PostgrestClient>> {
    vec![
        Box::new(TableAccess::users()),
        Box::new(TableAccess::expenses()),
        Box::new(InsertPolicy),
    ]
}
