//! msgflow-lint CLI - Message Flow Static Analyzer
//!
//! Lints `.msgflow` diagrams for unconnected terminals, disabled monitoring
//! events and missing parser settings.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use msgflow_lint::config::{CliOverrides, ColorMode, Config, ReportFormat};
use msgflow_lint::engine::Engine;
use msgflow_lint::files::collect_files;
use msgflow_lint::output;
use msgflow_lint::rules::{self, registry, Scope};
use msgflow_lint::Severity;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "msgflow-lint",
    version,
    about = "Message Flow Linter",
    long_about = "A static analyzer for .msgflow integration diagrams. 101 rules over 14 node kinds."
)]
struct Cli {
    /// Files, directories or glob patterns to lint
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// When to use colors
    #[arg(long, value_enum)]
    color: Option<Color>,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,

    /// Enable verbose output (rule descriptions and debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Only enable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Ignore rules by key prefix (e.g., 'HttpRequestNode')
    #[arg(long, value_delimiter = ',')]
    ignore: Vec<String>,

    /// Minimum severity to report
    #[arg(long, value_enum)]
    min_severity: Option<SeverityArg>,

    /// Lowest severity that makes the run fail
    #[arg(long, value_enum)]
    fail_on: Option<SeverityArg>,

    /// Hide statistics
    #[arg(long)]
    no_stats: bool,

    /// Append node ids to compact output
    #[arg(long)]
    node_ids: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Show detailed information about a specific rule
    #[arg(long, value_name = "RULE_KEY")]
    explain: Option<String>,

    /// Print the extracted flow model of each file as JSON
    #[arg(long)]
    dump_model: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Compact,
    Sonar,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Json => ReportFormat::Json,
            Format::Compact => ReportFormat::Compact,
            Format::Sonar => ReportFormat::Sonar,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeverityArg {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
}

impl From<SeverityArg> for Severity {
    fn from(severity: SeverityArg) -> Self {
        match severity {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Minor => Severity::Minor,
            SeverityArg::Major => Severity::Major,
            SeverityArg::Critical => Severity::Critical,
            SeverityArg::Blocker => Severity::Blocker,
        }
    }
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    let s = severity.to_string();
    match severity {
        Severity::Info => s.blue(),
        Severity::Minor => s.yellow(),
        _ => s.red(),
    }
}

fn list_rules() {
    let all = registry::all();
    println!("{}", format!("Available rules ({}):", all.len()).bold());
    println!();

    for meta in all {
        println!("    {} [{}]", meta.key.cyan(), severity_label(meta.severity));
        println!("      {}", meta.name);
    }
}

fn explain_rule(key: &str) -> Result<()> {
    let (Some(meta), Some(rule)) = (registry::metadata(key), rules::find(key)) else {
        bail!("Rule '{}' not found. Use --list-rules to see all available rules", key);
    };

    println!("{}", "Rule Details".bold());
    println!();
    println!("  {}: {}", "Key".bold(), meta.key.cyan());
    println!("  {}: {}", "Name".bold(), meta.name);
    println!("  {}: {}", "Severity".bold(), severity_label(meta.severity));
    println!("  {}: {}", "Node kind".bold(), rule.kind);
    println!(
        "  {}: {}",
        "Scope".bold(),
        match rule.scope {
            Scope::Node => "node",
            Scope::Flow => "flow",
        }
    );
    if let Some(flag) = rule.precondition {
        println!("  {}: '{}' enabled", "Applies when".bold(), flag.label());
    }
    println!();
    println!("  {}", "Description".bold());
    println!("  {}", meta.description);
    println!();
    println!("  {}: {}", "Tags".bold(), meta.tags.join(", "));

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::discover().context("Failed to load config")?,
    };

    let color = if cli.no_color {
        Some(ColorMode::Never)
    } else {
        cli.color.map(|color| match color {
            Color::Auto => ColorMode::Auto,
            Color::Always => ColorMode::Always,
            Color::Never => ColorMode::Never,
        })
    };

    config.apply(CliOverrides {
        format: cli.format.map(ReportFormat::from),
        color,
        verbose: cli.verbose,
        no_stats: cli.no_stats,
        node_ids: cli.node_ids,
        jobs: cli.jobs,
        disable: cli.disable.clone(),
        select: cli.select.clone(),
        ignore: cli.ignore.clone(),
        min_severity: cli.min_severity.map(Severity::from),
        fail_on: cli.fail_on.map(Severity::from),
    });

    // Rule keys given on the command line are held to the same checks
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(key) = &cli.explain {
        explain_rule(key)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.list_rules {
        list_rules();
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;

    let use_color = match config.report.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(use_color);

    if cli.files.is_empty() {
        bail!("No files specified\n\nUsage: msgflow-lint [OPTIONS] <FILES>...\n\nFor more information, try '--help'");
    }

    let files = collect_files(&cli.files, &config.files)?;
    if files.is_empty() {
        log::warn!("No message flow files found");
    }

    let engine = Engine::new(config);

    if cli.dump_model {
        let dump = engine.models(&files);
        for (_, flow) in &dump.models {
            println!("{}", serde_json::to_string_pretty(flow)?);
        }
        for failure in &dump.failures {
            eprintln!(
                "{}: {}: {}",
                "error".red().bold(),
                failure.file.display(),
                failure.message
            );
        }
        return Ok(ExitCode::from(dump.exit_code() as u8));
    }

    let result = engine.lint(&files);
    let formatter = output::formatter(&engine.config().report, use_color);
    print!("{}", formatter.format(&result));

    let code = result.exit_code(engine.config().rules.fail_on);
    Ok(ExitCode::from(code as u8))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG takes precedence
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}
