//! End-to-end analysis of message flow diagrams

use msgflow_lint::config::Config;
use msgflow_lint::diagnostic::Severity;
use msgflow_lint::files::collect_files;
use msgflow_lint::output::{OutputFormatter, SonarFormatter};
use msgflow_lint::rules::Check;
use msgflow_lint::{extract, DiagramDocument, Engine, NodeKind, RULES};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn diagram(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ecore:EPackage xmi:version="2.0" xmlns:xmi="http://www.omg.org/XMI" xmlns:ecore="http://www.eclipse.org/emf/2002/Ecore" xmlns:eflow="http://www.ibm.com/wbi/2005/eflow">
  <eClassifiers xmi:type="eflow:FCMComposite" name="FCMComposite_1">
    <composition>
{body}
    </composition>
  </eClassifiers>
</ecore:EPackage>"#
    )
}

fn keys(engine: &Engine, source: &str) -> Vec<String> {
    engine
        .analyze_source(source, Path::new("Inline.msgflow"))
        .unwrap()
        .diagnostics
        .iter()
        .map(|d| d.rule_key.clone())
        .collect()
}

/// Terminal rules of a kind as (key, terminal, is_input)
fn terminal_rules(kind: NodeKind) -> Vec<(&'static str, &'static str, bool)> {
    RULES
        .iter()
        .filter(|rule| rule.kind == kind)
        .filter_map(|rule| match rule.check {
            Check::InputTerminal(terminal) => Some((rule.key, terminal, true)),
            Check::OutputTerminal(terminal) => Some((rule.key, terminal, false)),
            _ => None,
        })
        .collect()
}

/// One node of `kind` next to a peer of a type the analyzer does not check
fn single_node(kind: NodeKind, wired: bool) -> String {
    let mut body = format!(
        r#"      <nodes xmi:type="{}.msgnode:FCMComposite_1" xmi:id="subject"/>
      <nodes xmi:type="ComIbmLabel.msgnode:FCMComposite_1" xmi:id="peer"/>
"#,
        kind.node_type()
    );
    if wired {
        for (_, terminal, is_input) in terminal_rules(kind) {
            let connection = if is_input {
                format!(
                    r#"      <connections sourceNode="peer" sourceTerminalName="OutTerminal.out" targetNode="subject" targetTerminalName="{terminal}"/>
"#
                )
            } else {
                format!(
                    r#"      <connections sourceNode="subject" sourceTerminalName="{terminal}" targetNode="peer" targetTerminalName="InTerminal.in"/>
"#
                )
            };
            body.push_str(&connection);
        }
    }
    diagram(&body)
}

#[test]
fn test_terminal_rules_count_unwired_terminals() {
    let engine = Engine::new(Config::default());

    for kind in NodeKind::ALL {
        let terminal_keys: Vec<&str> = terminal_rules(kind).iter().map(|(key, _, _)| *key).collect();
        let connectivity = |source: &str| -> Vec<String> {
            keys(&engine, source)
                .into_iter()
                .filter(|key| terminal_keys.contains(&key.as_str()))
                .collect()
        };

        assert!(
            connectivity(&single_node(kind, true)).is_empty(),
            "{kind} reported a wired terminal"
        );
        assert_eq!(
            connectivity(&single_node(kind, false)),
            terminal_keys,
            "{kind} unwired terminals"
        );
    }
}

#[test]
fn test_terminal_names_are_case_sensitive() {
    let engine = Engine::new(Config::default());
    let source = diagram(
        r#"      <nodes xmi:type="ComIbmCompute.msgnode:FCMComposite_1" xmi:id="calc"/>
      <nodes xmi:type="ComIbmLabel.msgnode:FCMComposite_1" xmi:id="peer"/>
      <connections sourceNode="peer" sourceTerminalName="OutTerminal.out" targetNode="calc" targetTerminalName="InTerminal.in"/>
      <connections sourceNode="calc" sourceTerminalName="OutTerminal.failure" targetNode="peer" targetTerminalName="InTerminal.in"/>
      <connections sourceNode="calc" sourceTerminalName="outterminal.out" targetNode="peer" targetTerminalName="InTerminal.in"/>
"#,
    );

    let found = keys(&engine, &source);
    assert!(found.contains(&"ComputeNodeOutTerminal".to_string()));
    assert!(!found.contains(&"ComputeNodeInTerminal".to_string()));
    assert!(!found.contains(&"ComputeNodeFailureTerminal".to_string()));
}

#[test]
fn test_extraction_is_idempotent() {
    let path = fixture("FileInput.msgflow");

    let first = extract(&DiagramDocument::load(&path).unwrap());
    let second = extract(&DiagramDocument::load(&path).unwrap());

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_unknown_kind_is_skipped() {
    let engine = Engine::new(Config::default());
    let analysis = engine.analyze_file(&fixture("Unknown.msgflow")).unwrap();

    assert_eq!(analysis.flow.len(), 1);
    assert_eq!(analysis.flow.count(NodeKind::TryCatch), 1);
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_absent_flag_same_as_disabled() {
    let engine = Engine::new(Config::default());
    let absent = diagram(
        r#"      <nodes xmi:type="ComIbmMQInput.msgnode:FCMComposite_1" xmi:id="in">
        <translation xmi:type="utility:ConstantString" string="IN"/>
      </nodes>
"#,
    );
    let explicit = diagram(
        r#"      <nodes xmi:type="ComIbmMQInput.msgnode:FCMComposite_1" xmi:id="in" parserXmlnscBuildTreeUsingXMLSchema="false" parserXmlnscMixedContentRetainMode="none" parserXmlnscCommentsRetainMode="none" validateMaster="none" messageDomainProperty="" messageSetProperty="">
        <translation xmi:type="utility:ConstantString" string="IN"/>
        <monitorEvents eventSourceName="IN.transaction.Start" eventEnabled="false"/>
      </nodes>
"#,
    );

    let messages = |source: &str| -> Vec<(String, String)> {
        engine
            .analyze_source(source, Path::new("Inline.msgflow"))
            .unwrap()
            .diagnostics
            .iter()
            .map(|d| (d.rule_key.clone(), d.message.clone()))
            .collect()
    };

    assert_eq!(messages(&absent), messages(&explicit));
    assert!(messages(&absent)
        .iter()
        .any(|(key, _)| key == "MQInputNodeMonitoringEvents"));
}

#[test]
fn test_collector_scenario() {
    let engine = Engine::new(Config::default());
    let analysis = engine.analyze_file(&fixture("Collector.msgflow")).unwrap();

    let found: Vec<&str> = analysis
        .diagnostics
        .iter()
        .map(|d| d.rule_key.as_str())
        .collect();
    assert_eq!(
        found,
        vec![
            "CollectorNodeFailureTerminal",
            "CollectorNodeExpireTerminal",
            "CollectorNodeCatchTerminal",
            "CollectorNodeMonitoringEvents",
        ]
    );

    let first = analysis.diagnostics.iter().next().unwrap();
    assert_eq!(first.node_id.as_deref(), Some("FCMComposite_1_2"));
    assert_eq!(first.line, 11);
    assert_eq!(
        first.message,
        "Collector node 'Aggregate Replies': output terminal 'OutTerminal.failure' is not connected"
    );
}

#[test]
fn test_missing_try_catch_reported_once() {
    let engine = Engine::new(Config::default());
    let analysis = engine.analyze_file(&fixture("FileInput.msgflow")).unwrap();
    let diagnostics: Vec<_> = analysis.diagnostics.iter().collect();

    let flow_level: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.rule_key == "TryCatchNodeTryCatch")
        .collect();
    assert_eq!(flow_level.len(), 1);
    assert!(flow_level[0].node_id.is_none());
    assert_eq!(flow_level[0].message, "No Try Catch node found in message flow");
    assert_eq!(diagnostics.last().unwrap().rule_key, "TryCatchNodeTryCatch");
}

#[test]
fn test_build_tree_gated_on_validation() {
    let engine = Engine::new(Config::default());
    let analysis = engine.analyze_file(&fixture("FileInput.msgflow")).unwrap();

    let file_input: Vec<&str> = analysis
        .diagnostics
        .iter()
        .filter(|d| d.rule_key.starts_with("FileInputNode"))
        .map(|d| d.rule_key.as_str())
        .collect();
    assert_eq!(
        file_input,
        vec![
            "FileInputNodeFailureTerminal",
            "FileInputNodeOutTerminal",
            "FileInputNodeEODTerminal",
            "FileInputNodeCatchTerminal",
            "FileInputNodeRetainMixedContent",
            "FileInputNodeRetainComments",
            "FileInputNodeValidation",
            "FileInputNodeMessageSet",
            "FileInputNodeMonitoringEvents",
        ]
    );
    assert!(!analysis
        .diagnostics
        .iter()
        .any(|d| d.rule_key == "MQInputNodeBuildTree"));
}

#[test]
fn test_build_tree_checked_when_validating() {
    let engine = Engine::new(Config::default());
    let source = diagram(
        r#"      <nodes xmi:type="ComIbmFileInput.msgnode:FCMComposite_1" xmi:id="in" validateMaster="contentAndValue"/>
"#,
    );

    let found = keys(&engine, &source);
    assert!(found.contains(&"FileInputNodeBuildTree".to_string()));
    assert!(!found.contains(&"FileInputNodeValidation".to_string()));
}

#[test]
fn test_batch_isolates_parse_failures() {
    let engine = Engine::new(Config::default());
    let result = engine.lint(&[fixture("Broken.msgflow"), fixture("Collector.msgflow")]);

    assert_eq!(result.files_processed, 2);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].file, fixture("Broken.msgflow"));
    assert_eq!(result.findings.len(), 4);
    assert!(result
        .findings
        .iter()
        .all(|f| f.file == fixture("Collector.msgflow")));
    assert_eq!(result.exit_code(Severity::Minor), 2);
}

#[test]
fn test_model_dump_continues_past_parse_failures() {
    let engine = Engine::new(Config::default());
    let dump = engine.models(&[fixture("Broken.msgflow"), fixture("Collector.msgflow")]);

    assert_eq!(dump.failures.len(), 1);
    assert_eq!(dump.failures[0].file, fixture("Broken.msgflow"));
    assert_eq!(dump.models.len(), 1);

    let (path, flow) = &dump.models[0];
    assert_eq!(path, &fixture("Collector.msgflow"));
    assert_eq!(flow.count(NodeKind::Collector), 1);
    assert_eq!(flow.count(NodeKind::TryCatch), 1);
    assert!(serde_json::to_string(flow).unwrap().contains("FCMComposite_1_2"));
    assert_eq!(dump.exit_code(), 2);

    let clean = engine.models(&[fixture("Collector.msgflow")]);
    assert!(clean.failures.is_empty());
    assert_eq!(clean.exit_code(), 0);
}

#[test]
fn test_configuration_filters_findings() {
    let mut config = Config::default();
    config
        .rules
        .disabled
        .push("CollectorNodeMonitoringEvents".to_string());
    config.rules.min_severity = Some(Severity::Minor);
    let engine = Engine::new(config);

    let result = engine.lint(&[fixture("Collector.msgflow"), fixture("FileInput.msgflow")]);

    assert!(result.findings.iter().all(|f| f.severity >= Severity::Minor));
    assert!(!result
        .findings
        .iter()
        .any(|f| f.rule_key == "CollectorNodeMonitoringEvents"
            || f.rule_key == "FileInputNodeValidation"));
    assert_eq!(result.count(Severity::Info), 0);
    assert_eq!(result.files_with_findings, 2);
}

#[test]
fn test_collect_fixture_directory() {
    let dir = fixture("").to_string_lossy().into_owned();
    let files = collect_files(&[dir], &Config::default().files).unwrap();

    let names: Vec<_> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Broken.msgflow",
            "Collector.msgflow",
            "FileInput.msgflow",
            "Unknown.msgflow",
        ]
    );
}

#[test]
fn test_sonar_report_for_batch() {
    let engine = Engine::new(Config::default());
    let result = engine.lint(&[fixture("Collector.msgflow"), fixture("FileInput.msgflow")]);

    let report: serde_json::Value =
        serde_json::from_str(&SonarFormatter::new().format(&result)).unwrap();
    let issues = report["issues"].as_array().unwrap();

    assert_eq!(issues.len(), result.findings.len());
    assert!(issues
        .iter()
        .any(|issue| issue["ruleId"] == "FileInputNodeValidation" && issue["severity"] == "INFO"));
}
