//! Analyzer configuration
//!
//! Looked up as `.msgflowlint.yaml`, `.msgflowlint.yml` or
//! `.msgflowlint.json`, first in the working directory and then in the home
//! directory. Command-line flags are applied on top through [`CliOverrides`].

use crate::diagnostic::Severity;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file names, in lookup order
pub const CONFIG_NAMES: [&str; 3] = [
    ".msgflowlint.yaml",
    ".msgflowlint.yml",
    ".msgflowlint.json",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported config file {0}, expected .yaml, .yml or .json")]
    UnsupportedFormat(PathBuf),

    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    #[error("invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

/// How a batch of diagrams is scheduled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Analyze diagrams on a thread pool
    pub parallel: bool,

    /// Pool size; 0 uses one thread per CPU
    pub jobs: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            jobs: 0,
        }
    }
}

impl AnalysisConfig {
    pub fn worker_count(&self) -> usize {
        match (self.parallel, self.jobs) {
            (false, _) => 1,
            (true, 0) => num_cpus::get(),
            (true, jobs) => jobs,
        }
    }
}

/// Report rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub color: ColorMode,

    /// Print the rule description under each finding
    pub verbose: bool,

    /// Print the per-severity summary
    pub statistics: bool,

    /// Append node ids to compact lines
    pub node_ids: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            color: ColorMode::Auto,
            verbose: false,
            statistics: true,
            node_ids: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Compact,
    /// Generic external issue report for code quality servers
    Sonar,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            "sonar" | "sonarqube" => Ok(Self::Sonar),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Which files a directory walk picks up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        let globs =
            |patterns: &[&str]| -> Vec<String> { patterns.iter().map(|p| p.to_string()).collect() };
        Self {
            include: globs(&["**/*.msgflow"]),
            // Build output and the toolkit's workspace metadata
            exclude: globs(&["**/target/**", "**/bin/**", "**/.metadata/**"]),
        }
    }
}

/// Rule selection and severities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule keys never run
    pub disabled: Vec<String>,

    /// When non-empty, only these rule keys run
    pub enabled: Vec<String>,

    /// Key prefixes never run, matched case-insensitively (e.g. "HttpRequestNode")
    pub ignore: Vec<String>,

    /// Severity replacing the registry default, by rule key
    pub severity: HashMap<String, Severity>,

    /// Findings below this severity are dropped
    pub min_severity: Option<Severity>,

    /// Findings at or above this severity make the run fail
    pub fail_on: Severity,

    /// Glob over file paths -> rule keys to skip there ("all" skips every rule)
    pub per_file: HashMap<String, Vec<String>>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            enabled: Vec::new(),
            ignore: Vec::new(),
            severity: HashMap::new(),
            min_severity: None,
            fail_on: Severity::Minor,
            per_file: HashMap::new(),
        }
    }
}

/// Settings given on the command line
///
/// `None` and empty lists leave the loaded configuration untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub format: Option<ReportFormat>,
    pub color: Option<ColorMode>,
    pub verbose: bool,
    pub no_stats: bool,
    pub node_ids: bool,
    pub jobs: Option<usize>,
    /// Added to `rules.disabled`
    pub disable: Vec<String>,
    /// Replaces `rules.enabled`
    pub select: Vec<String>,
    /// Added to `rules.ignore`
    pub ignore: Vec<String>,
    pub min_severity: Option<Severity>,
    pub fail_on: Option<Severity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub files: FilesConfig,
    pub rules: RulesConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate a YAML or JSON configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        config.validate()?;
        log::debug!("using configuration {}", path.display());
        Ok(config)
    }

    /// First configuration file found in the working or home directory
    ///
    /// Falls back to defaults when there is none.
    pub fn discover() -> Result<Self, ConfigError> {
        let found = std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::home_dir())
            .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
            .find(|path| path.is_file());

        match found {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Reject rule keys outside the catalogue and malformed globs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rule_keys = self
            .rules
            .disabled
            .iter()
            .chain(&self.rules.enabled)
            .chain(self.rules.severity.keys())
            .chain(self.rules.per_file.values().flatten().filter(|k| *k != "all"));
        if let Some(unknown) = rule_keys.into_iter().find(|k| crate::rules::find(k).is_none()) {
            return Err(ConfigError::UnknownRule(unknown.clone()));
        }

        let patterns = self
            .files
            .include
            .iter()
            .chain(&self.files.exclude)
            .chain(self.rules.per_file.keys());
        for pattern in patterns {
            Glob::new(pattern).map_err(|e| ConfigError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Layer command-line settings over the loaded configuration
    pub fn apply(&mut self, cli: CliOverrides) {
        if let Some(format) = cli.format {
            self.report.format = format;
        }
        if let Some(color) = cli.color {
            self.report.color = color;
        }
        self.report.verbose |= cli.verbose;
        if cli.no_stats {
            self.report.statistics = false;
        }
        self.report.node_ids |= cli.node_ids;
        if let Some(jobs) = cli.jobs {
            self.analysis.jobs = jobs;
        }

        self.rules.disabled.extend(cli.disable);
        if !cli.select.is_empty() {
            self.rules.enabled = cli.select;
        }
        self.rules.ignore.extend(cli.ignore);
        if cli.min_severity.is_some() {
            self.rules.min_severity = cli.min_severity;
        }
        if let Some(fail_on) = cli.fail_on {
            self.rules.fail_on = fail_on;
        }
    }

    /// Whether the rule runs at all
    pub fn rule_enabled(&self, key: &str) -> bool {
        let selected = self.rules.enabled.is_empty() || self.rules.enabled.iter().any(|k| k == key);
        selected && !self.rules.disabled.iter().any(|k| k == key) && !self.ignored_by_prefix(key)
    }

    pub fn ignored_by_prefix(&self, key: &str) -> bool {
        let key = key.to_ascii_lowercase();
        self.rules
            .ignore
            .iter()
            .any(|prefix| key.starts_with(&prefix.to_ascii_lowercase()))
    }

    /// Configured severity of a rule, or `default` when not overridden
    pub fn severity_for(&self, key: &str, default: Severity) -> Severity {
        self.rules.severity.get(key).copied().unwrap_or(default)
    }

    /// Whether a finding of this severity passes `min_severity`
    pub fn reports(&self, severity: Severity) -> bool {
        self.rules.min_severity.map_or(true, |min| severity >= min)
    }

    /// Compile `rules.per_file` for repeated lookups
    pub fn per_file_ignores(&self) -> Result<PerFileIgnores, ConfigError> {
        PerFileIgnores::compile(&self.rules.per_file)
    }
}

/// `rules.per_file` compiled into a single glob set
#[derive(Debug)]
pub struct PerFileIgnores {
    globs: GlobSet,
    /// Rule keys per glob, in the order the globs were added
    keys: Vec<Vec<String>>,
}

impl Default for PerFileIgnores {
    fn default() -> Self {
        Self {
            globs: GlobSet::empty(),
            keys: Vec::new(),
        }
    }
}

impl PerFileIgnores {
    pub fn compile(per_file: &HashMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        let mut keys = Vec::with_capacity(per_file.len());
        for (pattern, rule_keys) in per_file {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
            keys.push(rule_keys.clone());
        }

        let globs = builder.build().map_err(|e| ConfigError::Pattern {
            pattern: per_file.keys().cloned().collect::<Vec<_>>().join(", "),
            message: e.to_string(),
        })?;
        Ok(Self { globs, keys })
    }

    /// Whether an entry matching `file` turns the rule off ("all" covers every rule)
    pub fn ignores(&self, key: &str, file: &Path) -> bool {
        self.globs
            .matches(file)
            .into_iter()
            .filter_map(|index| self.keys.get(index))
            .flatten()
            .any(|k| k == "all" || k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert!(config.analysis.parallel);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert_eq!(config.files.include, vec!["**/*.msgflow"]);
        assert_eq!(config.rules.fail_on, Severity::Minor);
        assert_eq!(config.rules.min_severity, None);
    }

    #[test]
    fn test_report_format_names() {
        assert_eq!("Compact".parse::<ReportFormat>(), Ok(ReportFormat::Compact));
        assert_eq!("sonarqube".parse::<ReportFormat>(), Ok(ReportFormat::Sonar));
        assert!("sarif".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_worker_count() {
        let mut analysis = AnalysisConfig::default();
        assert!(analysis.worker_count() >= 1);

        analysis.jobs = 3;
        assert_eq!(analysis.worker_count(), 3);

        analysis.parallel = false;
        assert_eq!(analysis.worker_count(), 1);
    }

    #[test]
    fn test_apply_cli_overrides() {
        let mut config = Config::new();
        config.rules.disabled.push("ComputeNodeInTerminal".to_string());

        config.apply(CliOverrides {
            format: Some(ReportFormat::Json),
            verbose: true,
            no_stats: true,
            node_ids: true,
            jobs: Some(4),
            disable: vec!["ComputeNodeMonitoringEvents".to_string()],
            fail_on: Some(Severity::Major),
            ..CliOverrides::default()
        });

        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.verbose);
        assert!(!config.report.statistics);
        assert!(config.report.node_ids);
        assert_eq!(config.analysis.jobs, 4);
        assert_eq!(
            config.rules.disabled,
            vec!["ComputeNodeInTerminal", "ComputeNodeMonitoringEvents"]
        );
        assert_eq!(config.rules.fail_on, Severity::Major);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = Config::new();
        config.rules.enabled.push("TryCatchNodeTryCatch".to_string());
        config.report.verbose = true;
        let before = config.clone();

        config.apply(CliOverrides::default());
        assert_eq!(config, before);
    }

    #[test]
    fn test_rule_selection() {
        let mut config = Config::new();
        assert!(config.rule_enabled("ComputeNodeInTerminal"));

        config.rules.disabled.push("ComputeNodeInTerminal".to_string());
        assert!(!config.rule_enabled("ComputeNodeInTerminal"));
        assert!(config.rule_enabled("ComputeNodeOutTerminal"));

        config.rules.enabled = vec!["TryCatchNodeTryCatch".to_string()];
        assert!(!config.rule_enabled("ComputeNodeOutTerminal"));
        assert!(config.rule_enabled("TryCatchNodeTryCatch"));
    }

    #[test]
    fn test_ignore_prefix_is_case_insensitive() {
        let mut config = Config::new();
        config.rules.ignore.push("httprequestnode".to_string());

        assert!(!config.rule_enabled("HttpRequestNodeHTTPHeader"));
        assert!(config.rule_enabled("HttpInputNodeOutTerminal"));
    }

    #[test]
    fn test_severity_and_threshold() {
        let mut config = Config::new();
        config
            .rules
            .severity
            .insert("TryCatchNodeTryCatch".to_string(), Severity::Critical);

        assert_eq!(
            config.severity_for("TryCatchNodeTryCatch", Severity::Minor),
            Severity::Critical
        );
        assert_eq!(
            config.severity_for("ComputeNodeInTerminal", Severity::Minor),
            Severity::Minor
        );

        assert!(config.reports(Severity::Info));
        config.rules.min_severity = Some(Severity::Minor);
        assert!(!config.reports(Severity::Info));
        assert!(config.reports(Severity::Blocker));
    }

    #[test]
    fn test_per_file_ignores() {
        let mut config = Config::new();
        config.rules.per_file.insert(
            "**/legacy/**".to_string(),
            vec!["ComputeNodeMonitoringEvents".to_string()],
        );
        config
            .rules
            .per_file
            .insert("**/Generated*.msgflow".to_string(), vec!["all".to_string()]);

        let ignores = config.per_file_ignores().unwrap();
        let legacy = Path::new("flows/legacy/Old.msgflow");
        assert!(ignores.ignores("ComputeNodeMonitoringEvents", legacy));
        assert!(!ignores.ignores("ComputeNodeInTerminal", legacy));
        assert!(ignores.ignores(
            "ComputeNodeInTerminal",
            Path::new("flows/GeneratedMain.msgflow")
        ));
        assert!(!ignores.ignores("ComputeNodeInTerminal", Path::new("flows/Main.msgflow")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_per_file_entries() {
        let ignores = Config::new().per_file_ignores().unwrap();
        assert!(!ignores.ignores("TryCatchNodeTryCatch", Path::new("Main.msgflow")));
        assert!(!PerFileIgnores::default().ignores("all", Path::new("Main.msgflow")));
    }

    #[test]
    fn test_yaml_sections() {
        let yaml = r#"
analysis:
  parallel: false
report:
  format: sonar
rules:
  disabled: [CollectorNodeExpireTerminal]
  severity:
    TryCatchNodeTryCatch: major
  min_severity: minor
  fail_on: major
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.analysis.parallel);
        assert_eq!(config.report.format, ReportFormat::Sonar);
        assert!(config.report.statistics);
        assert_eq!(
            config.severity_for("TryCatchNodeTryCatch", Severity::Minor),
            Severity::Major
        );
        assert_eq!(config.rules.min_severity, Some(Severity::Minor));
        assert_eq!(config.rules.fail_on, Severity::Major);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut config = Config::new();
        config.rules.ignore.push("SoapRequestNode".to_string());
        config.report.color = ColorMode::Never;

        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_unknown_rule() {
        let mut config = Config::new();
        config
            .rules
            .per_file
            .insert("**/*.msgflow".to_string(), vec!["NoSuchRule".to_string()]);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownRule(key)) if key == "NoSuchRule"
        ));
    }

    #[test]
    fn test_validate_bad_glob() {
        let mut config = Config::new();
        config.files.exclude.push("flows/[".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Pattern { .. })));
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"report": {{"format": "compact"}}}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.report.format, ReportFormat::Compact);
        assert!(config.analysis.parallel);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "rules:\n  disabled: [NoSuchRule]\n").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::UnknownRule(_))
        ));

        let toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            Config::load(toml.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
