//! Google Sheets integration checks.

use async_trait::async_trait;
use spendcheck_client::SpendwiseClient;
use spendcheck_core::{AuthUrl, CheckReport, SheetsStatus};

use crate::check::{judge, transport_failure, Check};

/// Characters of the consent URL shown after a pass.
const URL_PREVIEW_CHARS: usize = 100;

/// `GET /api/google/status` reports a boolean connection flag.
#[derive(Debug, Default)]
pub struct SheetsConnection;

#[async_trait]
impl Check for SheetsConnection {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Google Sheets Status"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.google_status().await {
            Ok(response) => judge(name, 200, response, |body| {
                let status = SheetsStatus::from_response(body)?;
                Ok(CheckReport::pass(
                    name,
                    format!("Status: {}", status.describe()),
                ))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, "")),
        }
    }
}

/// `GET /api/google/auth` issues a Google OAuth 2.0 consent URL.
#[derive(Debug, Default)]
pub struct OAuthUrl;

#[async_trait]
impl Check for OAuthUrl {
    type Target = SpendwiseClient;

    fn name(&self) -> &'static str {
        "Google OAuth URL"
    }

    async fn run(&self, client: &SpendwiseClient) -> CheckReport {
        let name = self.name();
        match client.google_auth_url().await {
            Ok(response) => judge(name, 200, response, |body| {
                let url = AuthUrl::from_response(body)?;
                Ok(CheckReport::pass(name, "Valid OAuth URL generated")
                    .with_info(format!("URL: {}...", url.preview(URL_PREVIEW_CHARS))))
            }),
            Err(err) => CheckReport::fail(name, transport_failure(&err, "")),
        }
    }
}
