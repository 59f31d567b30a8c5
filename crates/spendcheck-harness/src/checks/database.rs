//! Direct database probes through PostgREST.

use async_trait::async_trait;
use chrono::Local;
use serde_json::json;
use spendcheck_client::{ApiResponse, PostgrestClient, PostgrestError};
use spendcheck_core::{CheckReport, Diagnosis};
use uuid::Uuid;

use crate::check::{transport_failure, Check};

/// User the SpendWise backend stores every expense under.
pub const MOCK_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// A table can be read with the anon key.
#[derive(Debug)]
pub struct TableAccess {
    name: &'static str,
    table: &'static str,
    columns: &'static str,
}

impl TableAccess {
    /// The `users` table.
    #[must_use]
    pub fn users() -> Self {
        Self {
            name: "Users Table",
            table: "users",
            columns: "id,email,name",
        }
    }

    /// The `expenses` table.
    #[must_use]
    pub fn expenses() -> Self {
        Self {
            name: "Expenses Table",
            table: "expenses",
            columns: "id,description,amount",
        }
    }
}

#[async_trait]
impl Check for TableAccess {
    type Target = PostgrestClient;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, client: &PostgrestClient) -> CheckReport {
        let response = match client.select(self.table, self.columns, 1).await {
            Ok(response) => response,
            Err(err) => return CheckReport::fail(self.name, transport_failure(&err, "")),
        };

        let report = if response.is_success() {
            match response.json() {
                Ok(rows) => CheckReport::pass(
                    self.name,
                    format!(
                        "{} table accessible ({} rows sampled)",
                        self.table,
                        rows.as_array().map_or(0, Vec::len)
                    ),
                ),
                Err(err) => CheckReport::fail(self.name, format!("Unexpected error: {err}")),
            }
        } else {
            let report = database_failure(self.name, self.table, &response);
            match PostgrestError::from_body(response.body()) {
                Some(err) if err.has_code(PostgrestError::TABLE_NOT_FOUND) => report.with_warning(
                    format!(
                        "The {} table does not exist. Run the database setup SQL first.",
                        self.table
                    ),
                ),
                _ => report,
            }
        };

        report.with_exchanges(vec![response.into_exchange()])
    }
}

/// Row level security allows the anon key to insert expenses.
///
/// The probe row is deleted again afterwards.
#[derive(Debug, Default)]
pub struct InsertPolicy;

#[async_trait]
impl Check for InsertPolicy {
    type Target = PostgrestClient;

    fn name(&self) -> &'static str {
        "Row Level Security"
    }

    async fn run(&self, client: &PostgrestClient) -> CheckReport {
        let name = self.name();
        let probe_id = Uuid::new_v4().to_string();
        let row = json!([{
            "id": probe_id,
            "user_id": MOCK_USER_ID,
            "amount": 1,
            "category": "Food",
            "description": "Test insert",
            "date": Local::now().date_naive().to_string(),
        }]);

        let inserted = match client.insert("expenses", &row).await {
            Ok(response) => response,
            Err(err) => return CheckReport::fail(name, transport_failure(&err, "")),
        };

        if !inserted.is_success() {
            let mut report = database_failure(name, "expenses", &inserted);
            if PostgrestError::from_body(inserted.body())
                .is_some_and(|err| err.has_code(PostgrestError::INSUFFICIENT_PRIVILEGE))
            {
                report = report.with_warning(
                    "RLS policy is blocking inserts. Run: \
                     ALTER TABLE public.expenses DISABLE ROW LEVEL SECURITY;",
                );
            }
            return report.with_exchanges(vec![inserted.into_exchange()]);
        }

        let mut report = CheckReport::pass(name, "Insert test successful");
        let mut exchanges = vec![inserted.into_exchange()];

        match client.delete_eq("expenses", "id", &probe_id).await {
            Ok(deleted) if deleted.is_success() => exchanges.push(deleted.into_exchange()),
            Ok(deleted) => {
                report = report.with_warning(format!(
                    "Probe row {probe_id} was not cleaned up: HTTP {}",
                    deleted.status()
                ));
                exchanges.push(deleted.into_exchange());
            }
            Err(err) => {
                report = report.with_warning(format!(
                    "Probe row {probe_id} was not cleaned up: {err}"
                ));
            }
        }

        report.with_exchanges(exchanges)
    }
}

fn database_failure(name: &str, table: &str, response: &ApiResponse) -> CheckReport {
    match PostgrestError::from_body(response.body()) {
        Some(err) => CheckReport::fail(name, format!("{table} table error: {}", err.message)),
        None => CheckReport::fail(name, Diagnosis::explain(response.status(), response.body())),
    }
}
