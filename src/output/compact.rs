//! Compact output formatter
//!
//! One line per finding for editors and scripts:
//! `path:line: severity [RuleKey] message`.

use super::OutputFormatter;
use crate::engine::{Finding, LintResult};

pub struct CompactFormatter {
    /// Append the node id, e.g. `(FCMComposite_1_2)`
    pub show_node: bool,
}

impl CompactFormatter {
    pub fn new() -> Self {
        Self { show_node: false }
    }

    pub fn with_node_ids(mut self) -> Self {
        self.show_node = true;
        self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        let findings = result.findings.iter().map(|f| self.format_finding(f));
        // Failures have no line number
        let failures = result
            .failures
            .iter()
            .map(|f| format!("{}:0: error {}", f.file.display(), f.message));

        findings.chain(failures).map(|line| line + "\n").collect()
    }

    fn format_finding(&self, finding: &Finding) -> String {
        let mut line = format!(
            "{}:{}: {} [{}] {}",
            finding.file.display(),
            finding.line,
            finding.severity,
            finding.rule_key,
            finding.message
        );

        if let (true, Some(node)) = (self.show_node, &finding.node_id) {
            line.push_str(&format!(" ({})", node));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::engine::FileFailure;
    use std::path::PathBuf;

    fn finding(line: usize, node_id: Option<&str>) -> Finding {
        Finding {
            file: PathBuf::from("Main.msgflow"),
            rule_key: "ComputeNodeOutTerminal".to_string(),
            rule_name: "Compute Node - The out terminal (output) is not connected.".to_string(),
            severity: Severity::Minor,
            node_id: node_id.map(str::to_string),
            message: "Compute node 'Calc': output terminal 'OutTerminal.out' is not connected"
                .to_string(),
            line,
        }
    }

    #[test]
    fn test_finding_line() {
        let output = CompactFormatter::new().format_finding(&finding(10, Some("FCMComposite_1_2")));
        assert_eq!(
            output,
            "Main.msgflow:10: minor [ComputeNodeOutTerminal] Compute node 'Calc': output terminal 'OutTerminal.out' is not connected"
        );
    }

    #[test]
    fn test_node_ids() {
        let formatter = CompactFormatter::new().with_node_ids();

        let with_node = formatter.format_finding(&finding(1, Some("FCMComposite_1_2")));
        assert!(with_node.starts_with("Main.msgflow:1: minor [ComputeNodeOutTerminal] Compute node"));
        assert!(with_node.ends_with(" (FCMComposite_1_2)"));

        // Flow-level findings carry no node
        let flow_level = formatter.format_finding(&finding(0, None));
        assert!(flow_level.ends_with("is not connected"));
    }

    #[test]
    fn test_findings_then_failures() {
        let result = LintResult {
            findings: vec![finding(1, None), finding(2, None)],
            failures: vec![FileFailure {
                file: PathBuf::from("Broken.msgflow"),
                message: "XML parse error at line 3: bad".to_string(),
            }],
            files_processed: 2,
            ..LintResult::default()
        };

        let output = CompactFormatter::new().format(&result);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Main.msgflow:2: minor"));
        assert_eq!(lines[2], "Broken.msgflow:0: error XML parse error at line 3: bad");
        assert!(output.ends_with('\n'));
    }
}
