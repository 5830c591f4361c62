//! Rule metadata: display name, description, severity and tags
//!
//! Diagnostics only carry a rule key. Reports resolve everything else here.

use super::catalogue::RULES;
use crate::diagnostic::Severity::{self, Info, Minor};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Tag carried by every rule
pub const BAD_PRACTICE: &str = "bad-practice";

/// Published metadata of one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMetadata {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub tags: &'static [&'static str],
}

const FAILURE: &str =
    "The failure terminal should be connected for a correct error handling.";

const OUT: &str =
    "Data is passed on to the next node over the out terminal. Therefore, this terminal should be connected.";

const CATCH: &str =
    "The catch terminal should be connected for a correct error handling.";

const MONITORING: &str =
    "Events are used to support transaction monitoring, transaction auditing and business process monitoring. Enable monitoring events if you need that support.";

const IN: &str =
    "Data is received by the in terminal. Therefore, this terminal should be connected.";

const BUILD_TREE: &str =
    "XML schema types are retained only if this option is enabled. Validation has to be enabled in order to select this option. (see validation)";

const MIXED_CONTENT: &str =
    "If messages contain mixed content, this checkbox should be enabled to have access to the content.";

const COMMENTS: &str =
    "If messages contain comments, this checkbox should be enabled to have access to the comments.";

const VALIDATION: &str =
    "Validation should be enabled to make sure incoming resp. outgoing messages are valid according to the given message set.";

const MESSAGE_DOMAIN: &str =
    "The message domain should be set in order to get the message tree parsed for later access to the message. (see also message set settings)";

const MESSAGE_SET: &str =
    "The message set should be set in order to get the message tree parsed for later access to the message. (see also message domain settings)";

const TIMEOUT: &str =
    "The timeout terminal should be connected for a correct error handling in case of a timeout.";

/// Key, default severity, name, description
static DEFINITIONS: [(&str, Severity, &str, &str); 101] = [
    ("CollectorNodeControlTerminal", Minor, "Collector Node - The control terminal (input) is not connected.", "Data is received by the control terminal. Therefore, this terminal should be connected."),
    ("CollectorNodeFailureTerminal", Minor, "Collector Node - The failure terminal (output) is not connected.", FAILURE),
    ("CollectorNodeOutTerminal", Minor, "Collector Node - The out terminal (output) is not connected.", OUT),
    ("CollectorNodeExpireTerminal", Minor, "Collector Node - The expire terminal (output) is not connected.", "The expire terminal should be connected for a correct error handling."),
    ("CollectorNodeCatchTerminal", Minor, "Collector Node - The catch terminal (output) is not connected.", CATCH),
    ("CollectorNodeMonitoringEvents", Minor, "Collector Node - No active monitoring events found.", MONITORING),
    ("ComputeNodeInTerminal", Minor, "Compute Node - The in terminal (input) is not connected.", IN),
    ("ComputeNodeFailureTerminal", Minor, "Compute Node - The failure terminal (output) is not connected.", FAILURE),
    ("ComputeNodeOutTerminal", Minor, "Compute Node - The out terminal (output) is not connected.", OUT),
    ("ComputeNodeMonitoringEvents", Minor, "Compute Node - No active monitoring events found.", MONITORING),
    ("FileInputNodeFailureTerminal", Minor, "File Input Node - The failure terminal (output) is not connected.", FAILURE),
    ("FileInputNodeOutTerminal", Minor, "File Input Node - The out terminal (output) is not connected.", OUT),
    ("FileInputNodeEODTerminal", Minor, "File Input Node - The EOD terminal (output) is not connected.", "If all messages in a file are processed, the end-of-data message is sent to this terminal. Connect the terminal if you need the end-of-data message."),
    ("FileInputNodeCatchTerminal", Minor, "File Input Node - The catch terminal (output) is not connected.", CATCH),
    ("FileInputNodeBuildTree", Minor, "File Input Node - Loss of data types: 'Build tree using XML schema data types' under 'Parser Options' is not set (see Properties).", BUILD_TREE),
    ("FileInputNodeRetainMixedContent", Minor, "File Input Node - Possible loss of data: 'Retain mixed content' under 'Parser Options' is not set (see Properties).", MIXED_CONTENT),
    ("FileInputNodeRetainComments", Minor, "File Input Node - Possible loss of data: 'Retain comments' under 'Parser Options' is not set (see Properties).", COMMENTS),
    ("FileInputNodeValidation", Info, "File Input Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("FileInputNodeMessageDomain", Info, "File Input Node - 'Message domain' under 'Input Message Parsing' is not set (see Properties).", MESSAGE_DOMAIN),
    ("FileInputNodeMessageSet", Info, "File Input Node - 'Message set' under 'Input Message Parsing' is not set (see Properties).", MESSAGE_SET),
    ("FileInputNodeMonitoringEvents", Minor, "File Input Node - No active monitoring events found.", MONITORING),
    ("FileOutputNodeInTerminal", Minor, "File Output Node - The in terminal (input) is not connected.", IN),
    ("FileOutputNodeInEODTerminal", Minor, "File Output Node - The EOD terminal (input) is not connected.", "The terminal is used to signal end-of-data. Therefore, the terminal should be connected in order to trigger the end-of-file processing."),
    ("FileOutputNodeFailureTerminal", Minor, "File Output Node - The failure terminal (output) is not connected.", FAILURE),
    ("FileOutputNodeOutTerminal", Minor, "File Output Node - The out terminal (output) is not connected.", OUT),
    ("FileOutputNodeOutEODTerminal", Minor, "File Output Node - The EOD terminal (output) is not connected.", "If the file is processed correctly, this terminal is used to send an end-of-data message. Connect the terminal, if you need the result of the processing."),
    ("FileOutputNodeValidation", Info, "File Output Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("FileOutputNodeMonitoringEvents", Minor, "File Output Node - No active monitoring events found.", MONITORING),
    ("HttpInputNodeFailureTerminal", Minor, "Http Input Node - The failure terminal (output) is not connected.", FAILURE),
    ("HttpInputNodeOutTerminal", Minor, "Http Input Node - The out terminal (output) is not connected.", OUT),
    ("HttpInputNodeTimeoutTerminal", Minor, "Http Input Node - The timeout terminal (output) is not connected.", TIMEOUT),
    ("HttpInputNodeCatchTerminal", Minor, "Http Input Node - The catch terminal (output) is not connected.", CATCH),
    ("HttpInputNodeBuildTree", Minor, "Http Input Node - Loss of data types: 'Build tree using XML schema data types' under 'Parser Options' is not set (see Properties).", BUILD_TREE),
    ("HttpInputNodeRetainMixedContent", Minor, "Http Input Node - Possible loss of data: 'Retain mixed content' under 'Parser Options' is not set (see Properties).", MIXED_CONTENT),
    ("HttpInputNodeRetainComments", Minor, "Http Input Node - Possible loss of data: 'Retain comments' under 'Parser Options' is not set (see Properties).", COMMENTS),
    ("HttpInputNodeValidation", Info, "Http Input Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("HttpInputNodeMessageDomain", Info, "Http Input Node - 'Message domain' under 'Input Message Parsing' is not set (see Properties).", MESSAGE_DOMAIN),
    ("HttpInputNodeMessageSet", Info, "Http Input Node - 'Message set' under 'Input Message Parsing' is not set (see Properties).", MESSAGE_SET),
    ("HttpInputNodeMonitoringEvents", Minor, "Http Input Node - No active monitoring events found.", MONITORING),
    ("HttpRequestNodeHTTPHeader", Info, "Http Request Node - Make sure the HTTP header contains a 'Host' element, e.g. InputRoot.HTTPRequestHeader.\"Host\".", "The HTTP header should contain certain values, e.g. the value for the host. Make sure you set the values in your ESQL code."),
    ("HttpRequestNodeMessageLocationTree", Info, "Http Request Node - Make sure the value of 'Request message location tree*' (see Properties 'Advanced') refers to the correct element, e.g. 'InputRoot.XMLNSC'.", "The HTTP payload has a certain position in the message tree (see your ESQL code). Make sure you set the correct path in the property section."),
    ("HttpRequestNodeInTerminal", Minor, "Http Request Node - The in terminal (input) is not connected.", IN),
    ("HttpRequestNodeFailureTerminal", Minor, "Http Request Node - The failure terminal (output) is not connected.", FAILURE),
    ("HttpRequestNodeOutTerminal", Minor, "Http Request Node - The out terminal (output) is not connected.", OUT),
    ("HttpRequestNodeErrorTerminal", Minor, "Http Request Node - The error terminal (output) is not connected.", "The error terminal should be connected for a correct error handling."),
    ("HttpRequestNodeBuildTree", Minor, "Http Request Node - Loss of data types: 'Build tree using XML schema data types' under 'Parser Options' is not set (see Properties).", BUILD_TREE),
    ("HttpRequestNodeRetainMixedContent", Minor, "Http Request Node - Possible loss of data: 'Retain mixed content' under 'Parser Options' is not set (see Properties).", MIXED_CONTENT),
    ("HttpRequestNodeRetainComments", Minor, "Http Request Node - Possible loss of data: 'Retain comments' under 'Parser Options' is not set (see Properties).", COMMENTS),
    ("HttpRequestNodeValidation", Info, "Http Request Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("HttpRequestNodeMessageDomain", Info, "Http Request Node - 'Message domain' under 'Response Message Parsing' is not set (see Properties).", MESSAGE_DOMAIN),
    ("HttpRequestNodeMessageSet", Info, "Http Request Node - 'Message set' under 'Response Message Parsing' is not set (see Properties).", MESSAGE_SET),
    ("HttpRequestNodeMonitoringEvents", Minor, "Http Request Node - No active monitoring events found.", MONITORING),
    ("MQInputNodeFailureTerminal", Minor, "MQ Input Node - The failure terminal (output) is not connected.", FAILURE),
    ("MQInputNodeOutTerminal", Minor, "MQ Input Node - The out terminal (output) is not connected.", OUT),
    ("MQInputNodeCatchTerminal", Minor, "MQ Input Node - The catch terminal (output) is not connected.", CATCH),
    ("MQInputNodeBuildTree", Minor, "MQ Input Node - Loss of data types: 'Build tree using XML schema data types' under 'Parser Options' is not set (see Properties).", BUILD_TREE),
    ("MQInputNodeRetainMixedContent", Minor, "MQ Input Node - Possible loss of data: 'Retain mixed content' under 'Parser Options' is not set (see Properties).", MIXED_CONTENT),
    ("MQInputNodeRetainComments", Minor, "MQ Input Node - Possible loss of data: 'Retain comments' under 'Parser Options' is not set (see Properties).", COMMENTS),
    ("MQInputNodeValidation", Info, "MQ Input Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("MQInputNodeMessageDomain", Info, "MQ Input Node - 'Message domain' under 'Input Message Parsing' is not set (see Properties).", MESSAGE_DOMAIN),
    ("MQInputNodeMessageSet", Info, "MQ Input Node - 'Message set' under 'Input Message Parsing' is not set (see Properties).", MESSAGE_SET),
    ("MQInputNodeMonitoringEvents", Minor, "MQ Input Node - No active monitoring events found.", MONITORING),
    ("MQOutputNodeInTerminal", Minor, "MQ Output Node - The in terminal (input) is not connected.", IN),
    ("MQOutputNodeFailureTerminal", Minor, "MQ Output Node - The failure terminal (output) is not connected.", FAILURE),
    ("MQOutputNodeOutTerminal", Minor, "MQ Output Node - The out terminal (output) is not connected.", OUT),
    ("MQOutputNodeValidation", Info, "MQ Output Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("MQOutputNodeMonitoringEvents", Minor, "MQ Output Node - No active monitoring events found.", MONITORING),
    ("ResetContentDescriptorNodeMessageDomain", Minor, "Reset Content Descriptor Node - 'Message Domain' under 'Basic' is not set (see Properties).", MESSAGE_DOMAIN),
    ("ResetContentDescriptorNodeMessageSet", Minor, "Reset Content Descriptor Node - 'Message Set' under 'Basic' is not set (see Properties).", MESSAGE_SET),
    ("ResetContentDescriptorNodeResetMessageDomain", Minor, "Reset Content Descriptor Node - 'Reset Message Domain' under 'Basic' is not set (see Properties).", "Reset should be enabled in order to get the message tree parsed again using the given message domain."),
    ("ResetContentDescriptorNodeResetMessageSet", Minor, "Reset Content Descriptor Node - 'Reset Message Set' under 'Basic' is not set (see Properties).", "Reset should be enabled in order to get the message tree parsed again using the given message set."),
    ("ResetContentDescriptorNodeResetMessageType", Minor, "Reset Content Descriptor Node - 'Reset Message Type' under 'Basic' is not set (see Properties).", "Reset should be enabled in order to get the message tree parsed again using the given message type."),
    ("ResetContentDescriptorNodeResetMessageFormat", Minor, "Reset Content Descriptor Node - 'Reset Message Format' under 'Basic' is not set (see Properties).", "Reset should be enabled in order to get the message tree parsed again using the given message format."),
    ("ResetContentDescriptorNodeMonitoringEvents", Minor, "Reset Content Descriptor Node - No active monitoring events found.", MONITORING),
    ("SoapInputNodeFailureTerminal", Minor, "Soap Input Node - The failure terminal (output) is not connected.", FAILURE),
    ("SoapInputNodeOutTerminal", Minor, "Soap Input Node - The out terminal (output) is not connected.", OUT),
    ("SoapInputNodeTimeoutTerminal", Minor, "Soap Input Node - The timeout terminal (output) is not connected.", TIMEOUT),
    ("SoapInputNodeCatchTerminal", Minor, "Soap Input Node - The catch terminal (output) is not connected.", CATCH),
    ("SoapInputNodeBuildTree", Minor, "Soap Input Node - Loss of data types: 'Build tree using XML schema data types' under 'Parser Options' is not set (see Properties).", BUILD_TREE),
    ("SoapInputNodeValidation", Info, "Soap Input Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("SoapInputNodeMonitoringEvents", Minor, "Soap Input Node - No active monitoring events found.", MONITORING),
    ("SoapRequestNodeInTerminal", Minor, "Soap Request Node - The in terminal (input) is not connected.", IN),
    ("SoapRequestNodeOutTerminal", Minor, "Soap Request Node - The out terminal (output) is not connected.", OUT),
    ("SoapRequestNodeFailureTerminal", Minor, "Soap Request Node - The failure terminal (output) is not connected.", FAILURE),
    ("SoapRequestNodeFaultTerminal", Minor, "Soap Request Node - The fault terminal (output) is not connected.", "The fault terminal should be connected for a correct error handling."),
    ("SoapRequestNodeBuildTree", Minor, "Soap Request Node - Loss of data types: 'Build tree using XML schema data types' under 'Parser Options' is not set (see Properties).", BUILD_TREE),
    ("SoapRequestNodeValidation", Info, "Soap Request Node - 'Validate' under 'Validation' is not set to 'Content and Value' (see Properties).", VALIDATION),
    ("SoapRequestNodeMonitoringEvents", Minor, "Soap Request Node - No active monitoring events found.", MONITORING),
    ("TimeoutControlNodeInTerminal", Minor, "Timeout Control Node - The in terminal (input) is not connected.", IN),
    ("TimeoutControlNodeFailureTerminal", Minor, "Timeout Control Node - The failure terminal (output) is not connected.", FAILURE),
    ("TimeoutControlNodeOutTerminal", Minor, "Timeout Control Node - The out terminal (output) is not connected.", OUT),
    ("TimeoutControlNodeMonitoringEvents", Minor, "Timeout Control Node - No active monitoring events found.", MONITORING),
    ("TimeoutNotificationNodeFailureTerminal", Minor, "Timeout Notification Node - The failure terminal (output) is not connected.", FAILURE),
    ("TimeoutNotificationNodeOutTerminal", Minor, "Timeout Notification Node - The out terminal (output) is not connected.", OUT),
    ("TimeoutNotificationNodeCatchTerminal", Minor, "Timeout Notification Node - The catch terminal (output) is not connected.", CATCH),
    ("TimeoutNotificationNodeMonitoringEvents", Minor, "Timeout Notification Node - No active monitoring events found.", MONITORING),
    ("TryCatchNodeTryCatch", Minor, "Try Catch Node - No TryCatch node found in message flow. Check exception handling of the message flow.", "Using a Try Catch Node is a good way to implement the exception handling for a message flow."),
    ("TryCatchNodeInTerminal", Minor, "Try Catch Node - The in terminal (input) is not connected.", IN),
    ("TryCatchNodeTryTerminal", Minor, "Try Catch Node - The try terminal (output) is not connected.", "Data is passed on to the next node over the try terminal. Therefore, this terminal should be connected."),
    ("TryCatchNodeCatchTerminal", Minor, "Try Catch Node - The catch terminal (output) is not connected.", CATCH),
    ("TryCatchNodeMonitoringEvents", Minor, "Try Catch Node - No active monitoring events found.", MONITORING),
];

static REGISTRY: LazyLock<HashMap<&'static str, RuleMetadata>> = LazyLock::new(|| {
    DEFINITIONS
        .iter()
        .map(|&(key, severity, name, description)| {
            let metadata = RuleMetadata {
                key,
                name,
                description,
                severity,
                tags: &[BAD_PRACTICE],
            };
            (key, metadata)
        })
        .collect()
});

/// Metadata of a rule key
pub fn metadata(key: &str) -> Option<&'static RuleMetadata> {
    REGISTRY.get(key)
}

/// Metadata of every catalogue rule, in catalogue order
pub fn all() -> Vec<&'static RuleMetadata> {
    RULES.iter().filter_map(|rule| metadata(rule.key)).collect()
}
