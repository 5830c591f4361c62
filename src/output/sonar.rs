//! SonarQube generic issue output formatter
//!
//! Outputs findings in the generic external issue import format.
//! https://docs.sonarsource.com/sonarqube/latest/analyzing-source-code/importing-external-issues/generic-issue-import-format/

use super::OutputFormatter;
use crate::engine::{Finding, LintResult};
use crate::rules::registry;
use serde::Serialize;

/// Engine id reported with every issue
pub const ENGINE_ID: &str = "msgflow-lint";

#[derive(Serialize)]
struct SonarReport {
    issues: Vec<SonarIssue>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SonarIssue {
    engine_id: &'static str,
    rule_id: String,
    severity: &'static str,
    #[serde(rename = "type")]
    issue_type: &'static str,
    primary_location: SonarLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SonarLocation {
    message: String,
    file_path: String,
    /// Absent for flow-level findings, which have no line
    #[serde(skip_serializing_if = "Option::is_none")]
    text_range: Option<SonarTextRange>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SonarTextRange {
    start_line: usize,
}

/// Formatter for the generic issue import format
pub struct SonarFormatter;

impl SonarFormatter {
    /// Create a new Sonar formatter
    pub fn new() -> Self {
        Self
    }

    fn issue(finding: &Finding) -> SonarIssue {
        // Every catalogue rule carries the bad-practice tag
        let issue_type = match registry::metadata(&finding.rule_key) {
            Some(meta) if meta.tags.contains(&registry::BAD_PRACTICE) => "CODE_SMELL",
            _ => "BUG",
        };

        SonarIssue {
            engine_id: ENGINE_ID,
            rule_id: finding.rule_key.clone(),
            severity: finding.severity.as_upper(),
            issue_type,
            primary_location: SonarLocation {
                message: finding.message.clone(),
                file_path: finding.file.display().to_string(),
                text_range: (finding.line > 0).then_some(SonarTextRange {
                    start_line: finding.line,
                }),
            },
        }
    }
}

impl Default for SonarFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for SonarFormatter {
    fn format(&self, result: &LintResult) -> String {
        let report = SonarReport {
            issues: result.findings.iter().map(Self::issue).collect(),
        };
        serde_json::to_string_pretty(&report).unwrap_or_default()
    }

    fn format_finding(&self, finding: &Finding) -> String {
        serde_json::to_string(&Self::issue(finding)).unwrap_or_default()
    }
}
