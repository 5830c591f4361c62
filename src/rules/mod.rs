//! Rule descriptors and evaluation
//!
//! A rule is data: the kind it is filed under, what it checks and an
//! optional precondition. [`evaluate`] runs any set of descriptors against a
//! flow model; the full set lives in [`catalogue::RULES`].

pub mod catalogue;
pub mod registry;

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::model::{Flag, FlowModel, NodeKind, NodeRecord, TextProperty};
use std::fmt;

pub use catalogue::RULES;

/// What a rule is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every node of the rule's kind, one diagnostic per failing node
    Node,
    /// The flow as a whole, at most one diagnostic per flow
    Flow,
}

/// The predicate a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// The named input terminal must be wired
    InputTerminal(&'static str),
    /// The named output terminal must be wired
    OutputTerminal(&'static str),
    /// The flag must be enabled
    FlagEnabled(Flag),
    /// The text property must be non-empty
    TextSet(TextProperty),
    /// Reported for every node of the kind; the diagram cannot show compliance
    Reminder(&'static str),
    /// The flow must contain at least one node of this kind
    NodePresent(NodeKind),
}

impl Check {
    fn description(&self) -> String {
        match self {
            Check::InputTerminal(terminal) => format!("input terminal '{terminal}' is not connected"),
            Check::OutputTerminal(terminal) => {
                format!("output terminal '{terminal}' is not connected")
            }
            Check::FlagEnabled(flag) => format!("'{}' is not enabled", flag.label()),
            Check::TextSet(property) => format!("'{}' is not set", property.label()),
            Check::Reminder(text) => (*text).to_string(),
            Check::NodePresent(kind) => format!("no {kind} node found in message flow"),
        }
    }
}

/// One entry of the rule catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Stable rule key, e.g. `CollectorNodeFailureTerminal`
    pub key: &'static str,
    /// Kind the rule is filed under; node rules only see nodes of this kind
    pub kind: NodeKind,
    pub scope: Scope,
    pub check: Check,
    /// Flag that must be enabled on a node for the rule to apply at all
    pub precondition: Option<Flag>,
}

impl RuleDescriptor {
    /// Apply a node-scoped rule to one record
    ///
    /// Returns `None` when the node passes, when the precondition is not met
    /// or when the rule does not apply to this node.
    pub fn evaluate_node(&self, node: &NodeRecord) -> Option<Diagnostic> {
        if self.scope != Scope::Node || node.kind() != self.kind {
            return None;
        }
        if let Some(flag) = self.precondition {
            if !node.flag(flag) {
                return None;
            }
        }

        let passes = match self.check {
            Check::InputTerminal(terminal) => node.has_input_terminal(terminal),
            Check::OutputTerminal(terminal) => node.has_output_terminal(terminal),
            Check::FlagEnabled(flag) => node.flag(flag),
            Check::TextSet(property) => !node.text(property).is_empty(),
            Check::Reminder(_) => false,
            Check::NodePresent(_) => true,
        };
        if passes {
            return None;
        }

        let message = format!(
            "{} node '{}': {}",
            self.kind,
            node.label(),
            self.check.description()
        );
        Some(Diagnostic::node(self.key, &node.id, message, node.line))
    }

    /// Apply a flow-scoped rule to a whole model
    pub fn evaluate_flow(&self, flow: &FlowModel) -> Option<Diagnostic> {
        if self.scope != Scope::Flow {
            return None;
        }

        let passes = match self.check {
            Check::NodePresent(kind) => flow.count(kind) > 0,
            _ => true,
        };
        if passes {
            return None;
        }

        let description = self.check.description();
        let message = capitalize(&description);
        Some(Diagnostic::flow(self.key, message))
    }
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Look up a catalogue rule by key
pub fn find(key: &str) -> Option<&'static RuleDescriptor> {
    RULES.iter().find(|rule| rule.key == key)
}

/// Evaluate `rules` against a flow model
///
/// Kinds are visited in [`NodeKind`] order. Within a kind, flow-scoped rules
/// come first, then every node of the kind in document order with the node
/// rules in the order they appear in `rules`.
pub fn evaluate(flow: &FlowModel, rules: &[RuleDescriptor]) -> DiagnosticSink {
    let mut sink = DiagnosticSink::new();

    for kind in NodeKind::ALL {
        let applicable: Vec<&RuleDescriptor> =
            rules.iter().filter(|rule| rule.kind == kind).collect();
        if applicable.is_empty() {
            continue;
        }

        for rule in applicable.iter().filter(|r| r.scope == Scope::Flow) {
            if let Some(diagnostic) = rule.evaluate_flow(flow) {
                sink.push(diagnostic);
            }
        }

        for node in flow.nodes(kind) {
            for rule in applicable.iter().filter(|r| r.scope == Scope::Node) {
                if let Some(diagnostic) = rule.evaluate_node(node) {
                    sink.push(diagnostic);
                }
            }
        }
    }

    log::debug!(
        "{}: {} diagnostics from {} rules",
        flow.path().display(),
        sink.len(),
        rules.len()
    );
    sink
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const OUT: RuleDescriptor = RuleDescriptor {
        key: "ComputeNodeOutTerminal",
        kind: NodeKind::Compute,
        scope: Scope::Node,
        check: Check::OutputTerminal("OutTerminal.out"),
        precondition: None,
    };

    const BUILD_TREE: RuleDescriptor = RuleDescriptor {
        key: "MQInputNodeBuildTree",
        kind: NodeKind::MqInput,
        scope: Scope::Node,
        check: Check::FlagEnabled(Flag::BuildTreeUsingSchema),
        precondition: Some(Flag::ValidateMaster),
    };

    const TRY_CATCH: RuleDescriptor = RuleDescriptor {
        key: "TryCatchNodeTryCatch",
        kind: NodeKind::TryCatch,
        scope: Scope::Flow,
        check: Check::NodePresent(NodeKind::TryCatch),
        precondition: None,
    };

    #[test]
    fn test_terminal_check() {
        let mut node = NodeRecord::new("n1", "Calc", NodeKind::Compute);
        node.line = 12;

        let diag = OUT.evaluate_node(&node).unwrap();
        assert_eq!(diag.rule_key, "ComputeNodeOutTerminal");
        assert_eq!(diag.node_id.as_deref(), Some("n1"));
        assert_eq!(diag.line, 12);
        assert_eq!(
            diag.message,
            "Compute node 'Calc': output terminal 'OutTerminal.out' is not connected"
        );

        node.output_terminals.insert("OutTerminal.out".to_string());
        assert!(OUT.evaluate_node(&node).is_none());
    }

    #[test]
    fn test_rule_ignores_other_kinds() {
        let node = NodeRecord::new("n1", "", NodeKind::MqOutput);
        assert!(OUT.evaluate_node(&node).is_none());
    }

    #[test]
    fn test_precondition_gates_rule() {
        let mut node = NodeRecord::new("n1", "In", NodeKind::MqInput);
        assert!(BUILD_TREE.evaluate_node(&node).is_none());

        node.validate_master = true;
        assert!(BUILD_TREE.evaluate_node(&node).is_some());

        node.build_tree_using_schema = true;
        assert!(BUILD_TREE.evaluate_node(&node).is_none());
    }

    #[test]
    fn test_text_check() {
        let rule = RuleDescriptor {
            key: "MQInputNodeMessageDomain",
            kind: NodeKind::MqInput,
            scope: Scope::Node,
            check: Check::TextSet(TextProperty::MessageDomainProperty),
            precondition: None,
        };
        let mut node = NodeRecord::new("n1", "", NodeKind::MqInput);

        let diag = rule.evaluate_node(&node).unwrap();
        assert_eq!(diag.message, "MQ Input node 'n1': 'Message domain' is not set");

        node.message_domain_property = "XMLNSC".to_string();
        assert!(rule.evaluate_node(&node).is_none());
    }

    #[test]
    fn test_reminder_always_reported() {
        let rule = RuleDescriptor {
            key: "HttpRequestNodeHTTPHeader",
            kind: NodeKind::HttpRequest,
            scope: Scope::Node,
            check: Check::Reminder("check the header"),
            precondition: None,
        };
        let node = NodeRecord::new("n1", "Call", NodeKind::HttpRequest);
        assert!(rule.evaluate_node(&node).is_some());
    }

    #[test]
    fn test_flow_rule() {
        let mut flow = FlowModel::new(Path::new("Flow.msgflow"));
        flow.push(NodeRecord::new("n1", "", NodeKind::Compute));

        let diag = TRY_CATCH.evaluate_flow(&flow).unwrap();
        assert!(diag.is_flow_scoped());
        assert_eq!(diag.message, "No Try Catch node found in message flow");

        flow.push(NodeRecord::new("n2", "", NodeKind::TryCatch));
        assert!(TRY_CATCH.evaluate_flow(&flow).is_none());
    }

    #[test]
    fn test_scopes_do_not_cross() {
        let node = NodeRecord::new("n1", "", NodeKind::TryCatch);
        let flow = FlowModel::new(Path::new("Flow.msgflow"));

        assert!(TRY_CATCH.evaluate_node(&node).is_none());
        assert!(OUT.evaluate_flow(&flow).is_none());
    }

    #[test]
    fn test_evaluate_orders_by_kind_then_node() {
        let mut flow = FlowModel::new(Path::new("Flow.msgflow"));
        flow.push(NodeRecord::new("tc", "", NodeKind::TryCatch));
        flow.push(NodeRecord::new("c1", "", NodeKind::Compute));
        flow.push(NodeRecord::new("c2", "", NodeKind::Compute));

        let no_try_catch = RuleDescriptor {
            check: Check::NodePresent(NodeKind::Collector),
            ..TRY_CATCH
        };
        let sink = evaluate(&flow, &[no_try_catch, OUT]);
        let subjects: Vec<_> = sink.iter().map(|d| d.node_id.as_deref()).collect();

        assert_eq!(subjects, vec![Some("c1"), Some("c2"), None]);
    }

    #[test]
    fn test_evaluate_empty_rule_set() {
        let mut flow = FlowModel::new(Path::new("Flow.msgflow"));
        flow.push(NodeRecord::new("c1", "", NodeKind::Compute));
        assert!(evaluate(&flow, &[]).is_empty());
    }

    #[test]
    fn test_find() {
        assert_eq!(
            find("CollectorNodeControlTerminal").map(|r| r.kind),
            Some(NodeKind::Collector)
        );
        assert!(find("NoSuchRule").is_none());
    }
}
