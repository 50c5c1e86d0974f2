// Core module for reporting compile errors and warnings.
// Every stage of the export pipeline reports through a single
// `ReportCollector`; nothing aborts on the first problem, so one run
// surfaces as many independent errors as possible.

use console::Style;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::location::Location;

/// Severity levels for reports
/// Used to categorize the importance of reports.
///
/// # Examples
/// ```
/// use fable_core::reports::Severity;
/// let severity = Severity::Error;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        };
        write!(f, "{}", s)
    }
}

/// A single diagnostic produced during export.
///
/// # Examples
/// ```
/// use fable_core::reports::{Report, Severity};
/// let report = Report::new("something went wrong", Severity::Error, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub message: String,
    pub severity: Severity,
    pub location: Option<Location>,
}

impl Report {
    /// Create a new report
    pub fn new(message: &str, severity: Severity, location: Option<Location>) -> Self {
        Report {
            message: message.to_string(),
            severity,
            location,
        }
    }

    pub fn error(message: &str, location: Option<Location>) -> Self {
        Report::new(message, Severity::Error, location)
    }

    pub fn warning(message: &str, location: Option<Location>) -> Self {
        Report::new(message, Severity::Warning, location)
    }

    /// The line written to the diagnostic stream for this report: the
    /// severity prefix, the message, and a source suffix. The suffix is
    /// only present when the report carries a location with `line >= 1`;
    /// synthesized nodes have no location and get the bare message.
    pub fn diagnostic_line(&self) -> String {
        match &self.location {
            Some(loc) if loc.line >= 1 => format!(
                "{}: {} on line {} of {}",
                self.severity, self.message, loc.line, loc.file
            ),
            _ => format!("{}: {}", self.severity, self.message),
        }
    }

    // convenience conversion to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// Display mirrors the stream format so `{}` in asserts and logs reads the
// same as compiler output.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic_line())
    }
}

/// Collector that aggregates reports and owns the sticky failure flag.
///
/// The flag is set by every reported error and checked exactly once, at the
/// end of an export, to decide whether the result is suppressed. It stays
/// set across export calls until [`ReportCollector::reset`] clears it; the
/// collected report list is never cleared by `reset`.
///
/// # Examples
/// ```
/// use fable_core::reports::ReportCollector;
/// let mut collector = ReportCollector::new();
/// collector.report("an error", None);
/// assert!(collector.has_failed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportCollector {
    reports: Vec<Report>,
    failed: bool,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            failed: false,
        }
    }

    /// Report a compile error: write the diagnostic line to the stream,
    /// record the report, and set the sticky failure flag. Never aborts the
    /// caller.
    pub fn report(&mut self, message: &str, location: Option<&Location>) {
        let report = Report::error(message, location.cloned());
        let line = report.diagnostic_line();
        let prefix_len = "ERROR".len();
        println!(
            "{}{}",
            Style::new().red().bold().apply_to(&line[..prefix_len]),
            &line[prefix_len..]
        );
        self.failed = true;
        self.reports.push(report);
    }

    /// Report a warning. Warnings are recorded and written but do not set
    /// the failure flag.
    pub fn warn(&mut self, message: &str, location: Option<&Location>) {
        let report = Report::warning(message, location.cloned());
        let line = report.diagnostic_line();
        let prefix_len = "WARNING".len();
        println!(
            "{}{}",
            Style::new().yellow().bold().apply_to(&line[..prefix_len]),
            &line[prefix_len..]
        );
        self.reports.push(report);
    }

    /// Whether any error has been reported since the last [`reset`].
    ///
    /// [`reset`]: ReportCollector::reset
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Clear the sticky failure flag only. Previously collected reports are
    /// kept, so a retried export still has the full history on record.
    pub fn reset(&mut self) {
        self.failed = false;
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        let mut e = 0;
        let mut w = 0;
        let mut i = 0;
        for r in &self.reports {
            match r.severity {
                Severity::Error => e += 1,
                Severity::Warning => w += 1,
                Severity::Info => i += 1,
            }
        }
        (e, w, i)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.reports)
    }
}
