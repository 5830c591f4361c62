//! Analysis engine: read, extract and evaluate diagram files

use crate::config::{Config, PerFileIgnores};
use crate::diagnostic::{DiagnosticSink, Severity};
use crate::document::{DiagramDocument, ParseError};
use crate::extract::extract;
use crate::model::FlowModel;
use crate::rules::{self, registry, RuleDescriptor};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Model and raw diagnostics of one diagram
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub flow: FlowModel,
    pub diagnostics: DiagnosticSink,
}

/// A diagnostic resolved against the rule registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub file: PathBuf,
    pub rule_key: String,
    /// Registry name of the rule
    pub rule_name: String,
    pub severity: Severity,
    pub node_id: Option<String>,
    pub message: String,
    pub line: usize,
}

/// A file that could not be analyzed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: PathBuf,
    pub message: String,
}

/// Extracted flow models of a batch, for `--dump-model`
#[derive(Debug, Default)]
pub struct ModelDump {
    /// Models in input order
    pub models: Vec<(PathBuf, FlowModel)>,
    pub failures: Vec<FileFailure>,
}

impl ModelDump {
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() {
            0
        } else {
            2
        }
    }
}

/// Result of analyzing a batch of files
#[derive(Debug, Default)]
pub struct LintResult {
    /// Findings in file order, then emission order
    pub findings: Vec<Finding>,

    /// Files that failed to read or parse
    pub failures: Vec<FileFailure>,

    /// Files processed, failed ones included
    pub files_processed: usize,

    /// Files with at least one finding
    pub files_with_findings: usize,

    /// Findings per severity
    pub counts: BTreeMap<Severity, usize>,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.counts.get(&severity).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.findings.len()
    }

    /// Check if result is clean (no findings, no failures)
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.failures.is_empty()
    }

    /// Get exit code (0 = clean, 1 = findings at or above `fail_on`, 2 = failures)
    pub fn exit_code(&self, fail_on: Severity) -> i32 {
        if !self.failures.is_empty() {
            2
        } else if self.findings.iter().any(|f| f.severity >= fail_on) {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        for (severity, count) in other.counts {
            *self.counts.entry(severity).or_insert(0) += count;
        }
        self.files_with_findings += other.files_with_findings;
        self.findings.extend(other.findings);
        self.failures.extend(other.failures);
        self.files_processed += other.files_processed;
    }
}

/// The analysis engine
pub struct Engine {
    config: Config,

    /// Catalogue rules left after configuration filtering
    rules: Vec<RuleDescriptor>,

    per_file: PerFileIgnores,
}

impl Engine {
    /// Create a new engine with configuration
    pub fn new(config: Config) -> Self {
        let rules: Vec<RuleDescriptor> = rules::RULES
            .iter()
            .filter(|rule| config.rule_enabled(rule.key))
            .copied()
            .collect();
        log::debug!("{} of {} rules enabled", rules.len(), rules::RULES.len());

        // Loaded configurations are validated, so this only fails for hand-built ones
        let per_file = config.per_file_ignores().unwrap_or_else(|e| {
            log::warn!("Per-file ignores disabled: {}", e);
            PerFileIgnores::default()
        });

        Self {
            config,
            rules,
            per_file,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enabled rules in catalogue order
    pub fn rules(&self) -> &[RuleDescriptor] {
        &self.rules
    }

    /// Analyze diagram content; `path` is reporting context only
    pub fn analyze_source(&self, content: &str, path: &Path) -> Result<FileAnalysis, ParseError> {
        let document = DiagramDocument::parse(content, path)?;
        Ok(self.analyze_document(&document))
    }

    /// Read and analyze one diagram file
    pub fn analyze_file(&self, path: &Path) -> Result<FileAnalysis, ParseError> {
        let document = DiagramDocument::load(path)?;
        Ok(self.analyze_document(&document))
    }

    fn analyze_document(&self, document: &DiagramDocument) -> FileAnalysis {
        let flow = extract(document);
        let diagnostics = rules::evaluate(&flow, &self.rules);
        FileAnalysis { flow, diagnostics }
    }

    /// Resolve raw diagnostics into reportable findings
    ///
    /// Applies severity overrides, the `min_severity` filter and per-file
    /// ignores. Diagnostics with no registry entry are dropped.
    pub fn findings(&self, path: &Path, diagnostics: &DiagnosticSink) -> Vec<Finding> {
        diagnostics
            .iter()
            .filter(|d| !self.per_file.ignores(&d.rule_key, path))
            .filter_map(|d| {
                let Some(meta) = registry::metadata(&d.rule_key) else {
                    log::warn!("No metadata for rule {}", d.rule_key);
                    return None;
                };
                let severity = self.config.severity_for(&d.rule_key, meta.severity);
                Some(Finding {
                    file: path.to_path_buf(),
                    rule_key: d.rule_key.clone(),
                    rule_name: meta.name.to_string(),
                    severity,
                    node_id: d.node_id.clone(),
                    message: d.message.clone(),
                    line: d.line,
                })
            })
            .filter(|f| self.config.reports(f.severity))
            .collect()
    }

    /// Lint multiple files
    ///
    /// A file that fails to parse is recorded as a failure and does not
    /// affect the others.
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let jobs = self.config.analysis.worker_count();
        let results: Vec<LintResult> = if jobs > 1 && files.len() > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect()),
                Err(e) => {
                    log::warn!("Falling back to sequential analysis: {}", e);
                    files.iter().map(|f| self.lint_file(f)).collect()
                }
            }
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    /// Extract the model of each file without running rules
    ///
    /// Like [`Engine::lint`], a file that fails to parse is recorded and the
    /// rest of the batch still goes through.
    pub fn models(&self, files: &[PathBuf]) -> ModelDump {
        let mut dump = ModelDump::default();
        for path in files {
            match DiagramDocument::load(path) {
                Ok(document) => dump.models.push((path.clone(), extract(&document))),
                Err(e) => {
                    log::warn!("{}: {}", path.display(), e);
                    dump.failures.push(FileFailure {
                        file: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        dump
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        match self.analyze_file(path) {
            Ok(analysis) => {
                log::debug!(
                    "{}: {} nodes, {} diagnostics",
                    path.display(),
                    analysis.flow.len(),
                    analysis.diagnostics.len()
                );
                result.findings = self.findings(path, &analysis.diagnostics);
                if !result.findings.is_empty() {
                    result.files_with_findings = 1;
                }
                for finding in &result.findings {
                    *result.counts.entry(finding.severity).or_insert(0) += 1;
                }
            }
            Err(e) => {
                log::warn!("{}: {}", path.display(), e);
                result.failures.push(FileFailure {
                    file: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }

        result
    }
}
