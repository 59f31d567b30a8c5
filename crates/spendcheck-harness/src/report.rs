//! Console output.

use std::io::{self, Stdout, Write};

use chrono::Local;
use spendcheck_core::{CheckReport, Exchange, Note, Status, Summary};

const RULE_WIDTH: usize = 60;

/// Writes human-readable check results.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
    verbose: bool,
}

impl ConsoleReporter<Stdout> {
    /// Reporter writing to standard output.
    #[must_use]
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Reporter writing to `out`. Verbose reporters print headers and bodies of every exchange.
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    /// Consume the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Opening banner of a suite.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn suite_header(&mut self, title: &str, target: &str) -> io::Result<()> {
        writeln!(self.out, "🧪 {title}")?;
        self.rule()?;
        writeln!(self.out, "Testing API at: {target}")?;
        writeln!(
            self.out,
            "Timestamp: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(self.out)
    }

    /// Banner before check number `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn check_header(&mut self, index: usize, title: &str) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "TEST {index}: {title}")?;
        self.rule()
    }

    /// A finished check: its exchanges, verdict and notes.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn report(&mut self, report: &CheckReport) -> io::Result<()> {
        for exchange in &report.exchanges {
            self.exchange(exchange)?;
        }

        self.log_line(report.status, &report.name, &report.detail)?;

        for note in &report.notes {
            match note {
                Note::Warn(message) => self.log_line(Status::Warn, &report.name, message)?,
                Note::Info(message) => writeln!(self.out, "    {message}")?,
            }
        }
        Ok(())
    }

    /// A scenario step: one status line, without banners.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn step(&mut self, report: &CheckReport) -> io::Result<()> {
        if self.verbose {
            for exchange in &report.exchanges {
                self.exchange(exchange)?;
            }
        }

        writeln!(
            self.out,
            "   {} {}: {}",
            report.status.symbol(),
            report.name,
            report.detail
        )?;
        for note in &report.notes {
            match note {
                Note::Warn(message) => {
                    writeln!(self.out, "   {} {message}", Status::Warn.symbol())?;
                }
                Note::Info(message) => writeln!(self.out, "   {message}")?,
            }
        }
        Ok(())
    }

    /// Free-form line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Horizontal rule.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    /// Final summary block.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "📊 TEST SUMMARY")?;
        self.rule()?;

        for (name, passed) in summary.entries() {
            let status = if *passed { Status::Pass } else { Status::Fail };
            writeln!(self.out, "{} {status} {name}", status.symbol())?;
        }

        writeln!(self.out)?;
        writeln!(
            self.out,
            "Results: {}/{} tests passed",
            summary.passed(),
            summary.total()
        )?;

        if summary.all_passed() {
            writeln!(self.out, "🎉 All tests passed!")
        } else {
            writeln!(
                self.out,
                "⚠️  Some tests failed - check logs above for details"
            )
        }
    }

    fn exchange(&mut self, exchange: &Exchange) -> io::Result<()> {
        writeln!(self.out, "Request URL: {} {}", exchange.method, exchange.url)?;
        if let Some(body) = &exchange.request_body {
            writeln!(self.out, "Request Body: {body}")?;
        }
        writeln!(self.out, "Response Status: {}", exchange.status)?;

        if self.verbose {
            let headers = exchange
                .headers
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.out, "Response Headers: {{{headers}}}")?;
            writeln!(self.out, "Response Data: {}", exchange.pretty_body())?;
        } else if !(200..300).contains(&exchange.status) {
            writeln!(self.out, "Response Body: {}", exchange.body)?;
        }
        Ok(())
    }

    fn log_line(&mut self, status: Status, name: &str, detail: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "[{}] {} {name}",
            Local::now().format("%H:%M:%S"),
            status.symbol()
        )?;
        if !detail.is_empty() {
            writeln!(self.out, "    Details: {detail}")?;
        }
        writeln!(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(status: u16, body: &str) -> Exchange {
        Exchange {
            method: "GET".into(),
            url: "http://localhost:3000/api/expenses".into(),
            request_body: None,
            status,
            headers: vec![("content-type".into(), "application/json".into())],
            body: body.into(),
        }
    }

    fn render(verbose: bool, f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new(), verbose);
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn report_prints_verdict_then_warnings() {
        let report = CheckReport::pass("Get Expenses", "Retrieved 1 expenses")
            .with_warning(r#"Expense missing fields: ["date"]"#)
            .with_exchanges(vec![exchange(200, r#"{"expenses":[{}]}"#)]);

        let output = render(false, |r| r.report(&report));

        let pass = output.find("✅ Get Expenses").unwrap();
        let warn = output.find("⚠️ Get Expenses").unwrap();
        assert!(pass < warn);
        assert!(output.contains("Request URL: GET http://localhost:3000/api/expenses"));
        assert!(output.contains("Response Status: 200"));
        assert!(!output.contains("Response Data"));
    }

    #[test]
    fn failed_exchange_body_is_always_shown() {
        let report = CheckReport::fail("Get Expenses", "HTTP 500: boom")
            .with_exchanges(vec![exchange(500, "boom")]);

        let output = render(false, |r| r.report(&report));
        assert!(output.contains("Response Body: boom"));
        assert!(output.contains("    Details: HTTP 500: boom"));
    }

    #[test]
    fn verbose_prints_headers_and_pretty_body() {
        let report = CheckReport::pass("Get Expenses", "Retrieved 0 expenses")
            .with_exchanges(vec![exchange(200, r#"{"expenses":[]}"#)]);

        let output = render(true, |r| r.report(&report));
        assert!(output.contains("Response Headers: {content-type: application/json}"));
        assert!(output.contains("Response Data: {\n  \"expenses\": []\n}"));
    }

    #[test]
    fn summary_block() {
        let mut summary = Summary::default();
        summary.record("Expense Parsing (AI)", true);
        summary.record("Expense Creation", false);

        let output = render(false, |r| r.summary(&summary));
        assert!(output.contains("✅ PASS Expense Parsing (AI)"));
        assert!(output.contains("❌ FAIL Expense Creation"));
        assert!(output.contains("Results: 1/2 tests passed"));
        assert!(output.contains("Some tests failed"));
    }

    #[test]
    fn all_passed_summary() {
        let mut summary = Summary::default();
        summary.record("Google OAuth URL", true);

        let output = render(false, |r| r.summary(&summary));
        assert!(output.contains("Results: 1/1 tests passed"));
        assert!(output.contains("🎉 All tests passed!"));
    }

    #[test]
    fn step_lines_are_indented() {
        let report = CheckReport::pass("Save expense", "Expense saved with ID: e1")
            .with_info("note");
        let output = render(false, |r| r.step(&report));
        assert_eq!(output, "   ✅ Save expense: Expense saved with ID: e1\n   note\n");
    }
}
