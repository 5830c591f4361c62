//! Node kinds understood by the analyzer

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of node kinds the analyzer extracts and checks
///
/// Declaration order is the iteration order of a [`crate::FlowModel`] and
/// therefore the order in which diagnostics are emitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum NodeKind {
    Collector,
    Compute,
    FileInput,
    FileOutput,
    HttpInput,
    HttpRequest,
    MqInput,
    MqOutput,
    ResetContentDescriptor,
    SoapInput,
    SoapRequest,
    TimeoutControl,
    TimeoutNotification,
    TryCatch,
}

/// Discriminator prefix (the part of `xmi:type` before `.msgnode`) per kind
static NODE_TYPES: [(&str, NodeKind); 14] = [
    ("ComIbmCollector", NodeKind::Collector),
    ("ComIbmCompute", NodeKind::Compute),
    ("ComIbmFileInput", NodeKind::FileInput),
    ("ComIbmFileOutput", NodeKind::FileOutput),
    ("ComIbmWSInput", NodeKind::HttpInput),
    ("ComIbmWSRequest", NodeKind::HttpRequest),
    ("ComIbmMQInput", NodeKind::MqInput),
    ("ComIbmMQOutput", NodeKind::MqOutput),
    ("ComIbmResetContentDescriptor", NodeKind::ResetContentDescriptor),
    ("ComIbmSOAPInput", NodeKind::SoapInput),
    ("ComIbmSOAPRequest", NodeKind::SoapRequest),
    ("ComIbmTimeoutControl", NodeKind::TimeoutControl),
    ("ComIbmTimeoutNotification", NodeKind::TimeoutNotification),
    ("ComIbmTryCatch", NodeKind::TryCatch),
];

impl NodeKind {
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Collector,
        NodeKind::Compute,
        NodeKind::FileInput,
        NodeKind::FileOutput,
        NodeKind::HttpInput,
        NodeKind::HttpRequest,
        NodeKind::MqInput,
        NodeKind::MqOutput,
        NodeKind::ResetContentDescriptor,
        NodeKind::SoapInput,
        NodeKind::SoapRequest,
        NodeKind::TimeoutControl,
        NodeKind::TimeoutNotification,
        NodeKind::TryCatch,
    ];

    /// Map an `xmi:type` value such as `ComIbmMQInput.msgnode:FCMComposite_1`
    ///
    /// Returns `None` for node types outside the catalogue.
    pub fn from_discriminator(xmi_type: &str) -> Option<Self> {
        let node_type = xmi_type.split_once(':').map_or(xmi_type, |(prefix, _)| prefix);
        let node_type = node_type.strip_suffix(".msgnode").unwrap_or(node_type);

        NODE_TYPES
            .iter()
            .find(|(name, _)| *name == node_type)
            .map(|(_, kind)| *kind)
    }

    /// Node type name used in diagram files
    pub fn node_type(&self) -> &'static str {
        NODE_TYPES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    /// Human-readable name, e.g. "MQ Input"
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Collector => "Collector",
            NodeKind::Compute => "Compute",
            NodeKind::FileInput => "File Input",
            NodeKind::FileOutput => "File Output",
            NodeKind::HttpInput => "Http Input",
            NodeKind::HttpRequest => "Http Request",
            NodeKind::MqInput => "MQ Input",
            NodeKind::MqOutput => "MQ Output",
            NodeKind::ResetContentDescriptor => "Reset Content Descriptor",
            NodeKind::SoapInput => "Soap Input",
            NodeKind::SoapRequest => "Soap Request",
            NodeKind::TimeoutControl => "Timeout Control",
            NodeKind::TimeoutNotification => "Timeout Notification",
            NodeKind::TryCatch => "Try Catch",
        }
    }

    /// Prefix shared by every rule key of this kind, e.g. "MQInputNode"
    pub fn rule_prefix(&self) -> &'static str {
        match self {
            NodeKind::Collector => "CollectorNode",
            NodeKind::Compute => "ComputeNode",
            NodeKind::FileInput => "FileInputNode",
            NodeKind::FileOutput => "FileOutputNode",
            NodeKind::HttpInput => "HttpInputNode",
            NodeKind::HttpRequest => "HttpRequestNode",
            NodeKind::MqInput => "MQInputNode",
            NodeKind::MqOutput => "MQOutputNode",
            NodeKind::ResetContentDescriptor => "ResetContentDescriptorNode",
            NodeKind::SoapInput => "SoapInputNode",
            NodeKind::SoapRequest => "SoapRequestNode",
            NodeKind::TimeoutControl => "TimeoutControlNode",
            NodeKind::TimeoutNotification => "TimeoutNotificationNode",
            NodeKind::TryCatch => "TryCatchNode",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_discriminator() {
        assert_eq!(
            NodeKind::from_discriminator("ComIbmMQInput.msgnode:FCMComposite_1"),
            Some(NodeKind::MqInput)
        );
        assert_eq!(
            NodeKind::from_discriminator("ComIbmWSRequest.msgnode:FCMComposite_1"),
            Some(NodeKind::HttpRequest)
        );
        assert_eq!(
            NodeKind::from_discriminator("ComIbmTryCatch"),
            Some(NodeKind::TryCatch)
        );
    }

    #[test]
    fn test_unknown_discriminator() {
        assert_eq!(
            NodeKind::from_discriminator("ComIbmRoute.msgnode:FCMComposite_1"),
            None
        );
        assert_eq!(NodeKind::from_discriminator("eflow:FCMConnection"), None);
        assert_eq!(NodeKind::from_discriminator(""), None);
    }

    #[test]
    fn test_discriminator_is_case_sensitive() {
        assert_eq!(
            NodeKind::from_discriminator("comibmmqinput.msgnode:FCMComposite_1"),
            None
        );
    }

    #[test]
    fn test_node_type_round_trip() {
        for kind in NodeKind::ALL {
            let xmi_type = format!("{}.msgnode:FCMComposite_1", kind.node_type());
            assert_eq!(NodeKind::from_discriminator(&xmi_type), Some(kind));
        }
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = NodeKind::ALL;
        sorted.sort();
        assert_eq!(sorted, NodeKind::ALL);
    }

    #[test]
    fn test_display() {
        assert_eq!(NodeKind::MqInput.to_string(), "MQ Input");
        assert_eq!(NodeKind::ResetContentDescriptor.rule_prefix(), "ResetContentDescriptorNode");
    }
}
