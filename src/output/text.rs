//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::Severity;
use crate::engine::{Finding, LintResult};
use crate::rules::registry;
use colored::*;
use std::path::Path;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show rule descriptions
    pub show_help: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_help: false,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Show the rule description under each finding
    pub fn with_help(mut self) -> Self {
        self.show_help = true;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = severity.to_string();
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Info => s.blue(),
            Severity::Minor => s.yellow().bold(),
            Severity::Major | Severity::Critical | Severity::Blocker => s.red().bold(),
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.colored {
            text.color(color).to_string()
        } else {
            text
        }
    }

    fn file_header(&self, file: &Path) -> String {
        if self.colored {
            format!("{}\n", file.display().to_string().underline())
        } else {
            format!("{}\n", file.display())
        }
    }

    fn format_stats(&self, result: &LintResult) -> String {
        let mut output = format!(
            "\n{} {} processed",
            result.files_processed,
            if result.files_processed == 1 {
                "file"
            } else {
                "files"
            }
        );

        let mut counts = Vec::new();
        for severity in Severity::ALL.iter().rev() {
            let count = result.count(*severity);
            if count > 0 {
                let s = format!("{} {}", count, severity);
                counts.push(match severity {
                    Severity::Info => self.paint(s, Color::Blue),
                    Severity::Minor => self.paint(s, Color::Yellow),
                    _ => self.paint(s, Color::Red),
                });
            }
        }
        if !result.failures.is_empty() {
            let n = result.failures.len();
            counts.push(self.paint(
                format!("{} {}", n, if n == 1 { "failure" } else { "failures" }),
                Color::Red,
            ));
        }

        if !counts.is_empty() {
            output.push_str(&format!(": {}", counts.join(", ")));
        }
        output.push('\n');

        output.push_str(&format!(
            "Finished in {:.2}s\n",
            result.duration.as_secs_f64()
        ));
        output
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        // Group findings by file, keeping the order files were reported in
        let mut by_file: Vec<(&Path, Vec<&Finding>)> = Vec::new();
        for finding in &result.findings {
            let file = finding.file.as_path();
            match by_file.iter().position(|(seen, _)| *seen == file) {
                Some(index) => by_file[index].1.push(finding),
                None => by_file.push((file, vec![finding])),
            }
        }

        for (file, findings) in &by_file {
            output.push_str(&self.file_header(file));
            for finding in findings {
                output.push_str(&self.format_finding(finding));
                output.push('\n');
            }
            output.push('\n');
        }

        for failure in &result.failures {
            output.push_str(&self.file_header(&failure.file));
            output.push_str(&format!(
                "  {}: {}\n\n",
                self.paint("error".to_string(), Color::Red),
                failure.message
            ));
        }

        if self.show_stats {
            output.push_str(&self.format_stats(result));
        }

        output
    }

    fn format_finding(&self, finding: &Finding) -> String {
        let mut output = format!(
            "  {} {}[{}]: {}",
            self.paint(format!("line:{}", finding.line), Color::BrightBlack),
            self.severity_str(finding.severity),
            self.paint(finding.rule_key.clone(), Color::Cyan),
            finding.message
        );

        if self.show_help {
            if let Some(meta) = registry::metadata(&finding.rule_key) {
                output.push_str(&format!(
                    "\n    {} help: {}",
                    self.paint("=".to_string(), Color::Blue),
                    meta.description
                ));
            }
        }

        output
    }
}
