//! Common test utilities for spendcheck integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spendcheck_harness::{ConsoleReporter, DatabaseCredentials, HarnessConfig};

/// Id the mock API assigns to created expenses.
pub const CREATED_ID: &str = "exp-42";

/// Google consent URL the mock API issues.
pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth?client_id=spendwise&scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fspreadsheets";

/// A mock SpendWise deployment.
pub struct TestHarness {
    /// The mock server standing in for the deployment.
    pub server: MockServer,
}

impl TestHarness {
    /// Start a mock deployment with no routes mounted.
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Start a mock deployment where every endpoint behaves.
    pub async fn healthy() -> Self {
        let harness = Self::new().await;
        harness.mount_healthy_api().await;
        harness
    }

    /// Configuration pointing the harness at the mock server.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            base_url: self.server.uri(),
            parse_timeout_seconds: 2,
            timeout_seconds: 2,
            ..HarnessConfig::default()
        }
    }

    /// Configuration pointing the database suite at the mock server.
    pub fn database_config(&self) -> HarnessConfig {
        HarnessConfig {
            database: Some(DatabaseCredentials {
                url: self.server.uri(),
                anon_key: "anon-test-key".into(),
            }),
            ..self.config()
        }
    }

    /// Answer `verb path` with `status` and a JSON body.
    pub async fn mount_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with `status` and a raw body, ahead of any healthy route.
    pub async fn override_raw(&self, verb: &str, route: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with `status` and a JSON body, ahead of any healthy route.
    pub async fn override_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Mount well-behaved responses for every SpendWise endpoint.
    pub async fn mount_healthy_api(&self) {
        self.mount_json(
            "POST",
            "/api/expenses/parse",
            200,
            json!({ "amount": 80, "category": "Food", "description": "coffee" }),
        )
        .await;
        self.mount_json("POST", "/api/expenses", 201, json!({ "expense": expense() }))
            .await;
        self.mount_json("GET", "/api/expenses", 200, json!({ "expenses": [expense()] }))
            .await;
        self.mount_json(
            "GET",
            "/api/expenses/weekly",
            200,
            json!({ "expenses": [expense()] }),
        )
        .await;
        self.mount_json(
            "GET",
            "/api/expenses/stats",
            200,
            json!({
                "thisWeekTotal": 450,
                "lastWeekTotal": 300,
                "percentageChange": 50,
                "categoryBreakdown": { "Food": 450 },
                "thisWeekCount": 1
            }),
        )
        .await;
        self.mount_json(
            "DELETE",
            &format!("/api/expenses/{CREATED_ID}"),
            200,
            json!({ "success": true }),
        )
        .await;
        self.mount_json("GET", "/api/google/status", 200, json!({ "connected": false }))
            .await;
        self.mount_json("GET", "/api/google/auth", 200, json!({ "authUrl": AUTH_URL }))
            .await;
    }

    /// Requests the mock server received, as `METHOD path` lines.
    pub async fn received(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| format!("{} {}", request.method, request.url.path()))
            .collect()
    }
}

/// The expense the mock API stores.
pub fn expense() -> Value {
    json!({
        "id": CREATED_ID,
        "amount": 150,
        "category": "Food",
        "description": "Lunch at restaurant",
        "date": "2024-01-15",
        "user_id": "00000000-0000-0000-0000-000000000001"
    })
}

/// A quiet reporter capturing output in memory.
pub fn reporter() -> ConsoleReporter<Vec<u8>> {
    ConsoleReporter::new(Vec::new(), false)
}

/// Everything a reporter printed.
pub fn output(reporter: ConsoleReporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).expect("report output is UTF-8")
}
