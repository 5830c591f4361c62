//! JSON output formatter

use super::OutputFormatter;
use crate::engine::{FileFailure, Finding, LintResult};
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_default()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    findings: &'a [Finding],
    failures: &'a [FileFailure],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    files_with_findings: usize,
    files_failed: usize,
    info_count: usize,
    minor_count: usize,
    major_count: usize,
    critical_count: usize,
    blocker_count: usize,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        use crate::diagnostic::Severity::*;

        let output = JsonOutput {
            findings: &result.findings,
            failures: &result.failures,
            summary: JsonSummary {
                files_processed: result.files_processed,
                files_with_findings: result.files_with_findings,
                files_failed: result.failures.len(),
                info_count: result.count(Info),
                minor_count: result.count(Minor),
                major_count: result.count(Major),
                critical_count: result.count(Critical),
                blocker_count: result.count(Blocker),
                duration_ms: result.duration.as_millis(),
            },
        };

        self.to_json(&output)
    }

    fn format_finding(&self, finding: &Finding) -> String {
        self.to_json(finding)
    }
}
