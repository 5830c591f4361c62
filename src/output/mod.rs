//! Output formatters for lint results

mod compact;
mod json;
mod sonar;
mod text;

pub use compact::CompactFormatter;
pub use json::JsonFormatter;
pub use sonar::SonarFormatter;
pub use text::TextFormatter;

use crate::config::{ReportConfig, ReportFormat};
use crate::engine::{Finding, LintResult};

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire lint result
    fn format(&self, result: &LintResult) -> String;

    /// Format a single finding
    fn format_finding(&self, finding: &Finding) -> String;
}

/// Formatter for the configured output format
pub fn formatter(config: &ReportConfig, colored: bool) -> Box<dyn OutputFormatter> {
    match config.format {
        ReportFormat::Text => {
            let mut text = TextFormatter::new();
            if !colored {
                text = text.without_color();
            }
            if config.verbose {
                text = text.with_help();
            }
            text.show_stats = config.statistics;
            Box::new(text)
        }
        ReportFormat::Compact if config.node_ids => {
            Box::new(CompactFormatter::new().with_node_ids())
        }
        ReportFormat::Compact => Box::new(CompactFormatter::new()),
        ReportFormat::Json => Box::new(JsonFormatter::new().pretty()),
        ReportFormat::Sonar => Box::new(SonarFormatter::new()),
    }
}
