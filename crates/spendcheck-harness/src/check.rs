//! The check abstraction and the sequential suite runner.

use std::io::Write;

use async_trait::async_trait;
use serde_json::Value;
use spendcheck_client::{ApiResponse, ClientError};
use spendcheck_core::{CheckReport, Diagnosis, ShapeError, Summary};
use tracing::{debug, info};

use crate::report::ConsoleReporter;

/// A single independent request/response check.
#[async_trait]
pub trait Check: Send + Sync {
    /// What the check talks to.
    type Target: Sync;

    /// Name used in log lines and the summary.
    fn name(&self) -> &'static str;

    /// Banner title; defaults to the name.
    fn title(&self) -> &'static str {
        self.name()
    }

    /// Run the check. Never fails; every problem becomes a FAIL report.
    async fn run(&self, target: &Self::Target) -> CheckReport;
}

/// A boxed check against `T`.
pub type BoxedCheck<T> = Box<dyn Check<Target = T>>;

/// Run checks in order, reporting each as it completes.
///
/// # Errors
///
/// Returns an error only if writing to the reporter fails.
pub async fn run_checks<T: Sync + 'static, W: Write>(
    checks: &[BoxedCheck<T>],
    target: &T,
    reporter: &mut ConsoleReporter<W>,
) -> std::io::Result<Summary> {
    let mut reports = Vec::with_capacity(checks.len());

    for (index, check) in checks.iter().enumerate() {
        reporter.check_header(index + 1, check.title())?;
        info!(check = check.name(), "running check");

        let report = check.run(target).await;
        debug!(check = check.name(), status = %report.status, detail = %report.detail, "check finished");

        reporter.report(&report)?;
        reports.push(report);
    }

    Ok(Summary::from_reports(&reports))
}

/// Judge a response that must carry `expected` status and a JSON body.
///
/// Any other status is diagnosed from the status code and body. The exchange
/// is attached to the returned report either way.
pub(crate) fn judge<F>(name: &str, expected: u16, response: ApiResponse, verdict: F) -> CheckReport
where
    F: FnOnce(&Value) -> Result<CheckReport, ShapeError>,
{
    let report = if response.status() == expected {
        match response.json() {
            Ok(body) => {
                verdict(&body).unwrap_or_else(|err| CheckReport::fail(name, err.to_string()))
            }
            Err(err) => CheckReport::fail(name, format!("Unexpected error: {err}")),
        }
    } else {
        CheckReport::fail(name, Diagnosis::explain(response.status(), response.body()))
    };

    report.with_exchanges(vec![response.into_exchange()])
}

/// Failure detail for a request that never produced a response.
///
/// `timeout_hint` is appended to timeout messages, e.g. `" - service might be slow"`.
pub(crate) fn transport_failure(err: &ClientError, timeout_hint: &str) -> String {
    match err {
        ClientError::Timeout { timeout } => {
            format!("Request timeout ({}s){timeout_hint}", timeout.as_secs())
        }
        ClientError::Connect(_) => "Connection error - API server not reachable".to_string(),
        other => format!("Unexpected error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use spendcheck_core::Status;

    struct Fixed {
        name: &'static str,
        passed: bool,
    }

    #[async_trait]
    impl Check for Fixed {
        type Target = ();

        fn name(&self) -> &'static str {
            self.name
        }

        async fn run(&self, _target: &()) -> CheckReport {
            if self.passed {
                CheckReport::pass(self.name, "ok")
            } else {
                CheckReport::fail(self.name, "broken")
            }
        }
    }

    #[tokio::test]
    async fn runner_summary_matches_logged_passes() {
        let checks: Vec<BoxedCheck<()>> = vec![
            Box::new(Fixed {
                name: "one",
                passed: true,
            }),
            Box::new(Fixed {
                name: "two",
                passed: false,
            }),
            Box::new(Fixed {
                name: "three",
                passed: true,
            }),
        ];

        let mut reporter = ConsoleReporter::new(Vec::new(), false);
        let summary = run_checks(&checks, &(), &mut reporter).await.unwrap();
        let output = String::from_utf8(reporter.into_inner()).unwrap();

        assert_eq!(summary.passed(), 2);
        assert_eq!(summary.total(), 3);
        assert_eq!(output.matches("✅ one").count(), 1);
        assert!(output.contains("TEST 2: two"));
        assert!(output.contains("❌ two"));
    }

    #[test]
    fn transport_failure_messages() {
        let timeout = ClientError::Timeout {
            timeout: Duration::from_secs(30),
        };
        assert_eq!(
            transport_failure(&timeout, " - AI parsing service might be slow"),
            "Request timeout (30s) - AI parsing service might be slow"
        );

        let config = ClientError::Configuration("bad".into());
        assert_eq!(
            transport_failure(&config, ""),
            "Unexpected error: configuration error: bad"
        );
    }

    #[test]
    fn fixed_check_title_defaults_to_name() {
        let check = Fixed {
            name: "Expense Parsing",
            passed: true,
        };
        assert_eq!(check.title(), "Expense Parsing");
        assert_eq!(CheckReport::pass("x", "y").status, Status::Pass);
    }
}
