//! Diagnostic types for analysis results

use serde::{Deserialize, Serialize};

/// Severity level of a rule
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational hint
    Info,
    /// Bad practice with limited impact
    #[default]
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Minor,
        Severity::Major,
        Severity::Critical,
        Severity::Blocker,
    ];

    /// Upper-case name used by code quality servers
    pub fn as_upper(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
            Severity::Blocker => "BLOCKER",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Minor => write!(f, "minor"),
            Severity::Major => write!(f, "major"),
            Severity::Critical => write!(f, "critical"),
            Severity::Blocker => write!(f, "blocker"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" => Ok(Severity::Info),
            "minor" => Ok(Severity::Minor),
            "major" => Ok(Severity::Major),
            "critical" => Ok(Severity::Critical),
            "blocker" => Ok(Severity::Blocker),
            _ => Err(()),
        }
    }
}

/// One rule violation
///
/// Node-scoped rules carry the id of the offending node; flow-scoped rules
/// have no subject node and report line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Key of the rule that produced this diagnostic
    pub rule_key: String,
    pub node_id: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Line of the subject node (1-based, 0 when not applicable)
    pub line: usize,
}

impl Diagnostic {
    /// Diagnostic about one node
    pub fn node(rule_key: &str, node_id: &str, message: String, line: usize) -> Self {
        Self {
            rule_key: rule_key.to_string(),
            node_id: Some(node_id.to_string()),
            message,
            line,
        }
    }

    /// Diagnostic about the flow as a whole
    pub fn flow(rule_key: &str, message: String) -> Self {
        Self {
            rule_key: rule_key.to_string(),
            node_id: None,
            message,
            line: 0,
        }
    }

    pub fn is_flow_scoped(&self) -> bool {
        self.node_id.is_none()
    }
}

/// Ordered collection of diagnostics for one flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic; emission order is preserved
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a DiagnosticSink {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
