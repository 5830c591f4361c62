//! Node extraction: diagram tree to flow model
//!
//! Extraction never fails. Elements that are not recognized nodes are
//! skipped, properties that are missing keep their defaults, and a
//! connection naming an unknown node is ignored.

pub mod profile;

use crate::document::{DiagramDocument, Element};
use crate::model::{FlowModel, NodeKind, NodeRecord};
use profile::{profile, PropertySpec};
use std::collections::HashMap;

const NODE_ELEMENT: &str = "nodes";
const CONNECTION_ELEMENT: &str = "connections";
const TYPE_ATTRIBUTE: &str = "xmi:type";
const ID_ATTRIBUTE: &str = "xmi:id";

/// Build the flow model of a parsed diagram
pub fn extract(document: &DiagramDocument) -> FlowModel {
    let mut records: Vec<NodeRecord> = Vec::new();
    let mut connections: Vec<&Element> = Vec::new();

    for element in document.root().descendants() {
        match element.local_name() {
            NODE_ELEMENT => {
                if let Some(record) = node_record(element) {
                    records.push(record);
                }
            }
            CONNECTION_ELEMENT => connections.push(element),
            _ => {}
        }
    }

    let mut by_id: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        by_id.entry(record.id.clone()).or_default().push(index);
    }

    for connection in connections {
        wire(connection, &by_id, &mut records);
    }

    log::debug!(
        "{}: extracted {} nodes",
        document.path().display(),
        records.len()
    );

    let mut flow = FlowModel::new(document.path());
    for record in records {
        flow.push(record);
    }
    flow
}

fn node_record(element: &Element) -> Option<NodeRecord> {
    let xmi_type = element.attribute(TYPE_ATTRIBUTE)?;
    let Some(kind) = NodeKind::from_discriminator(xmi_type) else {
        log::debug!(
            "skipping node of unknown type '{}' at line {}",
            xmi_type,
            element.line
        );
        return None;
    };

    let id = element.attribute(ID_ATTRIBUTE).unwrap_or_default();
    let mut record = NodeRecord::new(id, node_name(element), kind);
    record.line = element.line;
    apply_profile(element, &mut record);
    Some(record)
}

/// User label from the `translation` child
fn node_name(element: &Element) -> &str {
    element
        .child("translation")
        .and_then(|t| t.attribute("string").or_else(|| t.attribute("key")))
        .unwrap_or_default()
}

fn apply_profile(element: &Element, record: &mut NodeRecord) {
    for entry in profile(record.kind()).properties {
        match *entry {
            PropertySpec::Flag {
                flag,
                path,
                enabled,
            } => {
                let on = path.values(element).iter().any(|v| *v == enabled);
                record.set_flag(flag, on);
            }
            PropertySpec::Text { property, path } => {
                if let Some(value) = path.values(element).first() {
                    record.set_text(property, *value);
                }
            }
        }
    }
}

fn wire(connection: &Element, by_id: &HashMap<String, Vec<usize>>, records: &mut [NodeRecord]) {
    let ends = [
        ("sourceNode", "sourceTerminalName", true),
        ("targetNode", "targetTerminalName", false),
    ];

    for (node_attr, terminal_attr, outgoing) in ends {
        let (Some(node), Some(terminal)) = (
            connection.attribute(node_attr),
            connection.attribute(terminal_attr),
        ) else {
            continue;
        };
        for &index in by_id.get(node).into_iter().flatten() {
            let terminals = if outgoing {
                &mut records[index].output_terminals
            } else {
                &mut records[index].input_terminals
            };
            terminals.insert(terminal.to_string());
        }
    }
}
