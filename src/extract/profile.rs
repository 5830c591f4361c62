//! Where each node kind keeps its configuration
//!
//! One static profile per kind lists the properties to read and the path
//! to read them from. The extractor walks this table instead of carrying
//! one code path per kind.

use crate::document::Element;
use crate::model::{Flag, NodeKind, TextProperty};

/// Location of a property value relative to the node element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyPath {
    /// Attribute on the node element
    Attribute(&'static str),
    /// Attribute on a direct child element; every matching child is read
    ChildAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

impl PropertyPath {
    /// All values found at this path
    pub fn values<'a>(&self, node: &'a Element) -> Vec<&'a str> {
        match *self {
            PropertyPath::Attribute(name) => node.attribute(name).into_iter().collect(),
            PropertyPath::ChildAttribute { element, attribute } => node
                .children_named(element)
                .filter_map(|child| child.attribute(attribute))
                .collect(),
        }
    }
}

/// A property read into a node record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySpec {
    /// The flag is set when any value at `path` equals `enabled`
    Flag {
        flag: Flag,
        path: PropertyPath,
        enabled: &'static str,
    },
    /// The first value at `path`
    Text {
        property: TextProperty,
        path: PropertyPath,
    },
}

/// Properties extracted for one node kind
#[derive(Debug)]
pub struct KindProfile {
    pub kind: NodeKind,
    pub properties: &'static [PropertySpec],
}

const BUILD_TREE: PropertySpec = PropertySpec::Flag {
    flag: Flag::BuildTreeUsingSchema,
    path: PropertyPath::Attribute("parserXmlnscBuildTreeUsingXMLSchema"),
    enabled: "true",
};

const MIXED_CONTENT: PropertySpec = PropertySpec::Flag {
    flag: Flag::MixedContentRetainMode,
    path: PropertyPath::Attribute("parserXmlnscMixedContentRetainMode"),
    enabled: "all",
};

const COMMENTS: PropertySpec = PropertySpec::Flag {
    flag: Flag::CommentsRetainMode,
    path: PropertyPath::Attribute("parserXmlnscCommentsRetainMode"),
    enabled: "all",
};

const VALIDATE: PropertySpec = PropertySpec::Flag {
    flag: Flag::ValidateMaster,
    path: PropertyPath::Attribute("validateMaster"),
    enabled: "contentAndValue",
};

const DOMAIN_PROPERTY: PropertySpec = PropertySpec::Text {
    property: TextProperty::MessageDomainProperty,
    path: PropertyPath::Attribute("messageDomainProperty"),
};

const SET_PROPERTY: PropertySpec = PropertySpec::Text {
    property: TextProperty::MessageSetProperty,
    path: PropertyPath::Attribute("messageSetProperty"),
};

const RECORD_DEFINITION: PropertySpec = PropertySpec::Text {
    property: TextProperty::RecordDefinition,
    path: PropertyPath::Attribute("recordDetection"),
};

const REQUEST_LOCATION: PropertySpec = PropertySpec::Text {
    property: TextProperty::RequestMsgLocationInTree,
    path: PropertyPath::Attribute("requestMsgLocationInTree"),
};

const MESSAGE_DOMAIN: PropertySpec = PropertySpec::Text {
    property: TextProperty::MessageDomain,
    path: PropertyPath::Attribute("messageDomain"),
};

const MESSAGE_SET: PropertySpec = PropertySpec::Text {
    property: TextProperty::MessageSet,
    path: PropertyPath::Attribute("messageSet"),
};

const RESET_DOMAIN: PropertySpec = PropertySpec::Flag {
    flag: Flag::ResetMessageDomain,
    path: PropertyPath::Attribute("resetMessageDomain"),
    enabled: "true",
};

const RESET_SET: PropertySpec = PropertySpec::Flag {
    flag: Flag::ResetMessageSet,
    path: PropertyPath::Attribute("resetMessageSet"),
    enabled: "true",
};

const RESET_TYPE: PropertySpec = PropertySpec::Flag {
    flag: Flag::ResetMessageType,
    path: PropertyPath::Attribute("resetMessageType"),
    enabled: "true",
};

const RESET_FORMAT: PropertySpec = PropertySpec::Flag {
    flag: Flag::ResetMessageFormat,
    path: PropertyPath::Attribute("resetMessageFormat"),
    enabled: "true",
};

const MONITORING: PropertySpec = PropertySpec::Flag {
    flag: Flag::MonitoringEventsEnabled,
    path: PropertyPath::ChildAttribute {
        element: "monitorEvents",
        attribute: "eventEnabled",
    },
    enabled: "true",
};

static PROFILES: [KindProfile; 14] = [
    KindProfile {
        kind: NodeKind::Collector,
        properties: &[MONITORING],
    },
    KindProfile {
        kind: NodeKind::Compute,
        properties: &[MONITORING],
    },
    KindProfile {
        kind: NodeKind::FileInput,
        properties: &[
            BUILD_TREE,
            MIXED_CONTENT,
            COMMENTS,
            VALIDATE,
            DOMAIN_PROPERTY,
            SET_PROPERTY,
            RECORD_DEFINITION,
            MONITORING,
        ],
    },
    KindProfile {
        kind: NodeKind::FileOutput,
        properties: &[VALIDATE, MONITORING],
    },
    KindProfile {
        kind: NodeKind::HttpInput,
        properties: &[
            BUILD_TREE,
            MIXED_CONTENT,
            COMMENTS,
            VALIDATE,
            DOMAIN_PROPERTY,
            SET_PROPERTY,
            MONITORING,
        ],
    },
    KindProfile {
        kind: NodeKind::HttpRequest,
        properties: &[
            BUILD_TREE,
            MIXED_CONTENT,
            COMMENTS,
            VALIDATE,
            DOMAIN_PROPERTY,
            SET_PROPERTY,
            REQUEST_LOCATION,
            MONITORING,
        ],
    },
    KindProfile {
        kind: NodeKind::MqInput,
        properties: &[
            BUILD_TREE,
            MIXED_CONTENT,
            COMMENTS,
            VALIDATE,
            DOMAIN_PROPERTY,
            SET_PROPERTY,
            MONITORING,
        ],
    },
    KindProfile {
        kind: NodeKind::MqOutput,
        properties: &[VALIDATE, MONITORING],
    },
    KindProfile {
        kind: NodeKind::ResetContentDescriptor,
        properties: &[
            MESSAGE_DOMAIN,
            MESSAGE_SET,
            RESET_DOMAIN,
            RESET_SET,
            RESET_TYPE,
            RESET_FORMAT,
            MONITORING,
        ],
    },
    KindProfile {
        kind: NodeKind::SoapInput,
        properties: &[BUILD_TREE, VALIDATE, MONITORING],
    },
    KindProfile {
        kind: NodeKind::SoapRequest,
        properties: &[BUILD_TREE, VALIDATE, MONITORING],
    },
    KindProfile {
        kind: NodeKind::TimeoutControl,
        properties: &[MONITORING],
    },
    KindProfile {
        kind: NodeKind::TimeoutNotification,
        properties: &[MONITORING],
    },
    KindProfile {
        kind: NodeKind::TryCatch,
        properties: &[MONITORING],
    },
];

/// Profile of a node kind
pub fn profile(kind: NodeKind) -> &'static KindProfile {
    // PROFILES is laid out in NodeKind declaration order
    let profile = &PROFILES[kind as usize];
    debug_assert_eq!(profile.kind, kind, "profile table out of order");
    profile
}
