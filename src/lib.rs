//! msgflow-lint - Message Flow Static Analyzer
//!
//! Detects bad practices in `.msgflow` integration diagrams: unconnected
//! terminals, disabled monitoring events, missing parser settings and flows
//! without exception handling.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> DiagramDocument -> extract -> FlowModel -> rules::evaluate -> DiagnosticSink
//! ```
//!
//! The engine loads configuration, reads each diagram into an element tree,
//! extracts the recognized nodes into a typed [`FlowModel`] and runs the rule
//! catalogue against it. Diagnostics carry only a rule key; reports resolve
//! names, descriptions and severities through [`rules::registry`].
//!
//! # Example
//!
//! ```no_run
//! use msgflow_lint::{Config, Engine};
//! use std::path::PathBuf;
//!
//! let engine = Engine::new(Config::default());
//! let result = engine.lint(&[PathBuf::from("flows/Main.msgflow")]);
//! for finding in &result.findings {
//!     println!("{}: {}", finding.rule_key, finding.message);
//! }
//! ```

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod engine;
pub mod extract;
pub mod files;
pub mod model;
pub mod output;
pub mod rules;

// Re-export main types
pub use config::Config;
pub use diagnostic::{Diagnostic, DiagnosticSink, Severity};
pub use document::{DiagramDocument, ParseError};
pub use engine::{Engine, FileAnalysis, Finding, LintResult, ModelDump};
pub use extract::extract;
pub use model::{FlowModel, NodeKind, NodeRecord};
pub use output::OutputFormatter;
pub use rules::{evaluate, RuleDescriptor, RULES};
