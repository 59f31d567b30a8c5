//! Check outcomes and the run summary.

use std::fmt;

use serde::Serialize;

/// Outcome level of a logged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The check passed.
    Pass,
    /// The check failed.
    Fail,
    /// Something looked off, but the check still stands.
    Warn,
}

impl Status {
    /// Console symbol for the level.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pass => "✅",
            Self::Fail => "❌",
            Self::Warn => "⚠️",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
            Self::Warn => write!(f, "WARN"),
        }
    }
}

/// One request/response pair, as observed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    /// HTTP method.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// Request body, if one was sent.
    pub request_body: Option<String>,
    /// Response status code.
    pub status: u16,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: String,
}

impl Exchange {
    /// The response body, pretty-printed when it is JSON.
    #[must_use]
    pub fn pretty_body(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| self.body.clone())
    }
}

/// Extra line attached to a report after its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Note {
    /// Logged as a WARN entry.
    Warn(String),
    /// Printed as an indented detail line.
    Info(String),
}

/// The result of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Check name as shown in the summary.
    pub name: String,
    /// Verdict; either [`Status::Pass`] or [`Status::Fail`].
    pub status: Status,
    /// Verdict detail.
    pub detail: String,
    /// Lines logged after the verdict.
    pub notes: Vec<Note>,
    /// Wire exchanges made by the check.
    pub exchanges: Vec<Exchange>,
}

impl CheckReport {
    /// A passing report.
    #[must_use]
    pub fn pass(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(name, Status::Pass, detail)
    }

    /// A failing report.
    #[must_use]
    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(name, Status::Fail, detail)
    }

    fn new(name: impl Into<String>, status: Status, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            detail: detail.into(),
            notes: Vec::new(),
            exchanges: Vec::new(),
        }
    }

    /// Attach a WARN line.
    #[must_use]
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.notes.push(Note::Warn(message.into()));
        self
    }

    /// Attach an informational line.
    #[must_use]
    pub fn with_info(mut self, message: impl Into<String>) -> Self {
        self.notes.push(Note::Info(message.into()));
        self
    }

    /// Attach the exchanges that led to this verdict, oldest first.
    #[must_use]
    pub fn with_exchanges(mut self, exchanges: Vec<Exchange>) -> Self {
        self.exchanges = exchanges;
        self
    }

    /// Whether the verdict is PASS.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    /// Number of WARN lines.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.notes
            .iter()
            .filter(|note| matches!(note, Note::Warn(_)))
            .count()
    }
}

/// Aggregate of verdicts for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    entries: Vec<(String, bool)>,
}

impl Summary {
    /// Build a summary from reports, preserving order.
    #[must_use]
    pub fn from_reports(reports: &[CheckReport]) -> Self {
        Self {
            entries: reports
                .iter()
                .map(|report| (report.name.clone(), report.passed()))
                .collect(),
        }
    }

    /// Record one verdict.
    pub fn record(&mut self, name: impl Into<String>, passed: bool) {
        self.entries.push((name.into(), passed));
    }

    /// Recorded verdicts in order.
    #[must_use]
    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    /// Number of passing checks.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.entries.iter().filter(|(_, passed)| *passed).count()
    }

    /// Number of checks run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Whether every recorded check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_match_pass_reports() {
        let reports = vec![
            CheckReport::pass("a", "ok"),
            CheckReport::fail("b", "broken"),
            CheckReport::pass("c", "ok").with_warning("odd record"),
        ];

        let summary = Summary::from_reports(&reports);
        let logged_passes = reports.iter().filter(|r| r.status == Status::Pass).count();

        assert_eq!(summary.passed(), logged_passes);
        assert_eq!(summary.total(), 3);
        assert!(!summary.all_passed());
    }

    #[test]
    fn warnings_do_not_change_the_verdict() {
        let report = CheckReport::pass("Get Expenses", "Retrieved 2 expenses")
            .with_warning("Expense missing fields: [\"date\"]")
            .with_info("Sample expense");

        assert!(report.passed());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn record_appends_in_order() {
        let mut summary = Summary::default();
        summary.record("first", true);
        summary.record("second", true);

        assert!(summary.all_passed());
        assert_eq!(summary.entries()[1].0, "second");
    }

    #[test]
    fn pretty_body_falls_back_to_raw_text() {
        let mut exchange = Exchange {
            method: "GET".into(),
            url: "http://localhost/api/expenses".into(),
            request_body: None,
            status: 502,
            headers: Vec::new(),
            body: "<html>bad gateway</html>".into(),
        };
        assert_eq!(exchange.pretty_body(), "<html>bad gateway</html>");

        exchange.body = r#"{"expenses":[]}"#.into();
        assert_eq!(exchange.pretty_body(), "{\n  \"expenses\": []\n}");
    }

    #[test]
    fn status_labels() {
        assert_eq!(Status::Pass.to_string(), "PASS");
        assert_eq!(Status::Warn.symbol(), "⚠️");
    }
}
