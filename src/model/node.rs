//! Typed record of one diagram node

use super::kind::NodeKind;
use serde::Serialize;
use std::collections::BTreeSet;

/// Boolean configuration fields a node record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Flag {
    BuildTreeUsingSchema,
    MixedContentRetainMode,
    CommentsRetainMode,
    ValidateMaster,
    ResetMessageDomain,
    ResetMessageSet,
    ResetMessageType,
    ResetMessageFormat,
    MonitoringEventsEnabled,
}

impl Flag {
    /// Property label as shown in the flow editor
    pub fn label(&self) -> &'static str {
        match self {
            Flag::BuildTreeUsingSchema => "Build tree using XML schema data types",
            Flag::MixedContentRetainMode => "Retain mixed content",
            Flag::CommentsRetainMode => "Retain comments",
            Flag::ValidateMaster => "Validate: Content and Value",
            Flag::ResetMessageDomain => "Reset message domain",
            Flag::ResetMessageSet => "Reset message set",
            Flag::ResetMessageType => "Reset message type",
            Flag::ResetMessageFormat => "Reset message format",
            Flag::MonitoringEventsEnabled => "Monitoring events",
        }
    }
}

/// String configuration fields a node record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextProperty {
    MessageDomain,
    MessageSet,
    MessageDomainProperty,
    MessageSetProperty,
    RequestMsgLocationInTree,
    RecordDefinition,
}

impl TextProperty {
    pub fn label(&self) -> &'static str {
        match self {
            TextProperty::MessageDomain | TextProperty::MessageDomainProperty => "Message domain",
            TextProperty::MessageSet | TextProperty::MessageSetProperty => "Message set",
            TextProperty::RequestMsgLocationInTree => "Request message location in tree",
            TextProperty::RecordDefinition => "Record definition",
        }
    }
}

/// One recognized node of a flow
///
/// Every configuration field defaults to `false` or an empty string; the
/// record does not distinguish "absent from the file" from "set to the
/// default". Terminal sets only hold names seen wired in the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    kind: NodeKind,
    /// Source line of the node element (0 when unknown)
    pub line: usize,
    pub input_terminals: BTreeSet<String>,
    pub output_terminals: BTreeSet<String>,

    pub build_tree_using_schema: bool,
    pub mixed_content_retain_mode: bool,
    pub comments_retain_mode: bool,
    pub validate_master: bool,
    pub reset_message_domain: bool,
    pub reset_message_set: bool,
    pub reset_message_type: bool,
    pub reset_message_format: bool,
    pub monitoring_events_enabled: bool,

    pub message_domain: String,
    pub message_set: String,
    pub message_domain_property: String,
    pub message_set_property: String,
    pub request_msg_location_in_tree: String,
    pub record_definition: String,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            line: 0,
            input_terminals: BTreeSet::new(),
            output_terminals: BTreeSet::new(),
            build_tree_using_schema: false,
            mixed_content_retain_mode: false,
            comments_retain_mode: false,
            validate_master: false,
            reset_message_domain: false,
            reset_message_set: false,
            reset_message_type: false,
            reset_message_format: false,
            monitoring_events_enabled: false,
            message_domain: String::new(),
            message_set: String::new(),
            message_domain_property: String::new(),
            message_set_property: String::new(),
            request_msg_location_in_tree: String::new(),
            record_definition: String::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Name for messages: the user label, or the id when unlabeled
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::BuildTreeUsingSchema => self.build_tree_using_schema,
            Flag::MixedContentRetainMode => self.mixed_content_retain_mode,
            Flag::CommentsRetainMode => self.comments_retain_mode,
            Flag::ValidateMaster => self.validate_master,
            Flag::ResetMessageDomain => self.reset_message_domain,
            Flag::ResetMessageSet => self.reset_message_set,
            Flag::ResetMessageType => self.reset_message_type,
            Flag::ResetMessageFormat => self.reset_message_format,
            Flag::MonitoringEventsEnabled => self.monitoring_events_enabled,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let field = match flag {
            Flag::BuildTreeUsingSchema => &mut self.build_tree_using_schema,
            Flag::MixedContentRetainMode => &mut self.mixed_content_retain_mode,
            Flag::CommentsRetainMode => &mut self.comments_retain_mode,
            Flag::ValidateMaster => &mut self.validate_master,
            Flag::ResetMessageDomain => &mut self.reset_message_domain,
            Flag::ResetMessageSet => &mut self.reset_message_set,
            Flag::ResetMessageType => &mut self.reset_message_type,
            Flag::ResetMessageFormat => &mut self.reset_message_format,
            Flag::MonitoringEventsEnabled => &mut self.monitoring_events_enabled,
        };
        *field = value;
    }

    pub fn text(&self, property: TextProperty) -> &str {
        match property {
            TextProperty::MessageDomain => &self.message_domain,
            TextProperty::MessageSet => &self.message_set,
            TextProperty::MessageDomainProperty => &self.message_domain_property,
            TextProperty::MessageSetProperty => &self.message_set_property,
            TextProperty::RequestMsgLocationInTree => &self.request_msg_location_in_tree,
            TextProperty::RecordDefinition => &self.record_definition,
        }
    }

    pub fn set_text(&mut self, property: TextProperty, value: impl Into<String>) {
        let field = match property {
            TextProperty::MessageDomain => &mut self.message_domain,
            TextProperty::MessageSet => &mut self.message_set,
            TextProperty::MessageDomainProperty => &mut self.message_domain_property,
            TextProperty::MessageSetProperty => &mut self.message_set_property,
            TextProperty::RequestMsgLocationInTree => &mut self.request_msg_location_in_tree,
            TextProperty::RecordDefinition => &mut self.record_definition,
        };
        *field = value.into();
    }

    /// Exact, case-sensitive terminal lookup
    pub fn has_input_terminal(&self, terminal: &str) -> bool {
        self.input_terminals.contains(terminal)
    }

    /// Exact, case-sensitive terminal lookup
    pub fn has_output_terminal(&self, terminal: &str) -> bool {
        self.output_terminals.contains(terminal)
    }
}
