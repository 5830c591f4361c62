//! The rule catalogue
//!
//! Grouped by kind in [`NodeKind`] order; within a kind, entries are in
//! reporting order.

use super::{Check, RuleDescriptor, Scope};
use crate::model::{Flag, NodeKind, TextProperty};
use crate::model::NodeKind::*;

const fn input(key: &'static str, kind: NodeKind, terminal: &'static str) -> RuleDescriptor {
    node_rule(key, kind, Check::InputTerminal(terminal))
}

const fn output(key: &'static str, kind: NodeKind, terminal: &'static str) -> RuleDescriptor {
    node_rule(key, kind, Check::OutputTerminal(terminal))
}

const fn flag(key: &'static str, kind: NodeKind, flag: Flag) -> RuleDescriptor {
    node_rule(key, kind, Check::FlagEnabled(flag))
}

const fn text(key: &'static str, kind: NodeKind, property: TextProperty) -> RuleDescriptor {
    node_rule(key, kind, Check::TextSet(property))
}

/// Schema data types are only kept when validation is on
const fn build_tree(key: &'static str, kind: NodeKind) -> RuleDescriptor {
    RuleDescriptor {
        precondition: Some(Flag::ValidateMaster),
        ..flag(key, kind, Flag::BuildTreeUsingSchema)
    }
}

const fn monitoring(key: &'static str, kind: NodeKind) -> RuleDescriptor {
    flag(key, kind, Flag::MonitoringEventsEnabled)
}

const fn node_rule(key: &'static str, kind: NodeKind, check: Check) -> RuleDescriptor {
    RuleDescriptor {
        key,
        kind,
        scope: Scope::Node,
        check,
        precondition: None,
    }
}

const FAILURE: &str = "OutTerminal.failure";
const OUT: &str = "OutTerminal.out";
const CATCH: &str = "OutTerminal.catch";
const TIMEOUT: &str = "OutTerminal.timeout";
const IN: &str = "InTerminal.in";

/// Every rule the analyzer knows
pub static RULES: [RuleDescriptor; 101] = [
    // Collector
    input("CollectorNodeControlTerminal", Collector, "InTerminal.control"),
    output("CollectorNodeFailureTerminal", Collector, FAILURE),
    output("CollectorNodeOutTerminal", Collector, OUT),
    output("CollectorNodeExpireTerminal", Collector, "OutTerminal.expire"),
    output("CollectorNodeCatchTerminal", Collector, CATCH),
    monitoring("CollectorNodeMonitoringEvents", Collector),
    // Compute
    input("ComputeNodeInTerminal", Compute, IN),
    output("ComputeNodeFailureTerminal", Compute, FAILURE),
    output("ComputeNodeOutTerminal", Compute, OUT),
    monitoring("ComputeNodeMonitoringEvents", Compute),
    // File Input
    output("FileInputNodeFailureTerminal", FileInput, FAILURE),
    output("FileInputNodeOutTerminal", FileInput, OUT),
    output("FileInputNodeEODTerminal", FileInput, "OutTerminal.endOfData"),
    output("FileInputNodeCatchTerminal", FileInput, CATCH),
    build_tree("FileInputNodeBuildTree", FileInput),
    flag("FileInputNodeRetainMixedContent", FileInput, Flag::MixedContentRetainMode),
    flag("FileInputNodeRetainComments", FileInput, Flag::CommentsRetainMode),
    flag("FileInputNodeValidation", FileInput, Flag::ValidateMaster),
    text("FileInputNodeMessageDomain", FileInput, TextProperty::MessageDomainProperty),
    text("FileInputNodeMessageSet", FileInput, TextProperty::MessageSetProperty),
    monitoring("FileInputNodeMonitoringEvents", FileInput),
    // File Output
    input("FileOutputNodeInTerminal", FileOutput, IN),
    input("FileOutputNodeInEODTerminal", FileOutput, "InTerminal.finish"),
    output("FileOutputNodeFailureTerminal", FileOutput, FAILURE),
    output("FileOutputNodeOutTerminal", FileOutput, OUT),
    output("FileOutputNodeOutEODTerminal", FileOutput, "OutTerminal.end"),
    flag("FileOutputNodeValidation", FileOutput, Flag::ValidateMaster),
    monitoring("FileOutputNodeMonitoringEvents", FileOutput),
    // Http Input
    output("HttpInputNodeFailureTerminal", HttpInput, FAILURE),
    output("HttpInputNodeOutTerminal", HttpInput, OUT),
    output("HttpInputNodeTimeoutTerminal", HttpInput, TIMEOUT),
    output("HttpInputNodeCatchTerminal", HttpInput, CATCH),
    build_tree("HttpInputNodeBuildTree", HttpInput),
    flag("HttpInputNodeRetainMixedContent", HttpInput, Flag::MixedContentRetainMode),
    flag("HttpInputNodeRetainComments", HttpInput, Flag::CommentsRetainMode),
    flag("HttpInputNodeValidation", HttpInput, Flag::ValidateMaster),
    text("HttpInputNodeMessageDomain", HttpInput, TextProperty::MessageDomainProperty),
    text("HttpInputNodeMessageSet", HttpInput, TextProperty::MessageSetProperty),
    monitoring("HttpInputNodeMonitoringEvents", HttpInput),
    // Http Request
    node_rule(
        "HttpRequestNodeHTTPHeader",
        HttpRequest,
        Check::Reminder("make sure the HTTP header contains a 'Host' element"),
    ),
    text(
        "HttpRequestNodeMessageLocationTree",
        HttpRequest,
        TextProperty::RequestMsgLocationInTree,
    ),
    input("HttpRequestNodeInTerminal", HttpRequest, IN),
    output("HttpRequestNodeFailureTerminal", HttpRequest, FAILURE),
    output("HttpRequestNodeOutTerminal", HttpRequest, OUT),
    output("HttpRequestNodeErrorTerminal", HttpRequest, "OutTerminal.error"),
    build_tree("HttpRequestNodeBuildTree", HttpRequest),
    flag("HttpRequestNodeRetainMixedContent", HttpRequest, Flag::MixedContentRetainMode),
    flag("HttpRequestNodeRetainComments", HttpRequest, Flag::CommentsRetainMode),
    flag("HttpRequestNodeValidation", HttpRequest, Flag::ValidateMaster),
    text("HttpRequestNodeMessageDomain", HttpRequest, TextProperty::MessageDomainProperty),
    text("HttpRequestNodeMessageSet", HttpRequest, TextProperty::MessageSetProperty),
    monitoring("HttpRequestNodeMonitoringEvents", HttpRequest),
    // MQ Input
    output("MQInputNodeFailureTerminal", MqInput, FAILURE),
    output("MQInputNodeOutTerminal", MqInput, OUT),
    output("MQInputNodeCatchTerminal", MqInput, CATCH),
    build_tree("MQInputNodeBuildTree", MqInput),
    flag("MQInputNodeRetainMixedContent", MqInput, Flag::MixedContentRetainMode),
    flag("MQInputNodeRetainComments", MqInput, Flag::CommentsRetainMode),
    flag("MQInputNodeValidation", MqInput, Flag::ValidateMaster),
    text("MQInputNodeMessageDomain", MqInput, TextProperty::MessageDomainProperty),
    text("MQInputNodeMessageSet", MqInput, TextProperty::MessageSetProperty),
    monitoring("MQInputNodeMonitoringEvents", MqInput),
    // MQ Output
    input("MQOutputNodeInTerminal", MqOutput, IN),
    output("MQOutputNodeFailureTerminal", MqOutput, FAILURE),
    output("MQOutputNodeOutTerminal", MqOutput, OUT),
    flag("MQOutputNodeValidation", MqOutput, Flag::ValidateMaster),
    monitoring("MQOutputNodeMonitoringEvents", MqOutput),
    // Reset Content Descriptor
    text(
        "ResetContentDescriptorNodeMessageDomain",
        ResetContentDescriptor,
        TextProperty::MessageDomain,
    ),
    text(
        "ResetContentDescriptorNodeMessageSet",
        ResetContentDescriptor,
        TextProperty::MessageSet,
    ),
    flag(
        "ResetContentDescriptorNodeResetMessageDomain",
        ResetContentDescriptor,
        Flag::ResetMessageDomain,
    ),
    flag(
        "ResetContentDescriptorNodeResetMessageSet",
        ResetContentDescriptor,
        Flag::ResetMessageSet,
    ),
    flag(
        "ResetContentDescriptorNodeResetMessageType",
        ResetContentDescriptor,
        Flag::ResetMessageType,
    ),
    flag(
        "ResetContentDescriptorNodeResetMessageFormat",
        ResetContentDescriptor,
        Flag::ResetMessageFormat,
    ),
    monitoring("ResetContentDescriptorNodeMonitoringEvents", ResetContentDescriptor),
    // Soap Input
    output("SoapInputNodeFailureTerminal", SoapInput, FAILURE),
    output("SoapInputNodeOutTerminal", SoapInput, OUT),
    output("SoapInputNodeTimeoutTerminal", SoapInput, TIMEOUT),
    output("SoapInputNodeCatchTerminal", SoapInput, CATCH),
    build_tree("SoapInputNodeBuildTree", SoapInput),
    flag("SoapInputNodeValidation", SoapInput, Flag::ValidateMaster),
    monitoring("SoapInputNodeMonitoringEvents", SoapInput),
    // Soap Request
    input("SoapRequestNodeInTerminal", SoapRequest, IN),
    output("SoapRequestNodeOutTerminal", SoapRequest, OUT),
    output("SoapRequestNodeFailureTerminal", SoapRequest, FAILURE),
    output("SoapRequestNodeFaultTerminal", SoapRequest, "OutTerminal.fault"),
    build_tree("SoapRequestNodeBuildTree", SoapRequest),
    flag("SoapRequestNodeValidation", SoapRequest, Flag::ValidateMaster),
    monitoring("SoapRequestNodeMonitoringEvents", SoapRequest),
    // Timeout Control
    input("TimeoutControlNodeInTerminal", TimeoutControl, IN),
    output("TimeoutControlNodeFailureTerminal", TimeoutControl, FAILURE),
    output("TimeoutControlNodeOutTerminal", TimeoutControl, OUT),
    monitoring("TimeoutControlNodeMonitoringEvents", TimeoutControl),
    // Timeout Notification
    output("TimeoutNotificationNodeFailureTerminal", TimeoutNotification, FAILURE),
    output("TimeoutNotificationNodeOutTerminal", TimeoutNotification, OUT),
    output("TimeoutNotificationNodeCatchTerminal", TimeoutNotification, CATCH),
    monitoring("TimeoutNotificationNodeMonitoringEvents", TimeoutNotification),
    // Try Catch
    RuleDescriptor {
        key: "TryCatchNodeTryCatch",
        kind: TryCatch,
        scope: Scope::Flow,
        check: Check::NodePresent(TryCatch),
        precondition: None,
    },
    input("TryCatchNodeInTerminal", TryCatch, IN),
    output("TryCatchNodeTryTerminal", TryCatch, "OutTerminal.try"),
    output("TryCatchNodeCatchTerminal", TryCatch, CATCH),
    monitoring("TryCatchNodeMonitoringEvents", TryCatch),
];
