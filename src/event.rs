//! Lifecycle event model for CloudFormation custom resource requests.
//!
//! CloudFormation delivers one event per resource operation. Only the fields
//! the handler acts on are modeled; everything else in the request envelope
//! (RequestId, StackId, ResponseURL, ...) is ignored on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The lifecycle operation CloudFormation is requesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// A custom resource lifecycle event.
///
/// `resource_properties` carries the desired pipeline configuration as raw
/// JSON, including the framework-injected `ServiceToken` key. The map is
/// never forwarded as-is; [`crate::transcoder::PipelineParams`] projects it
/// onto the pipeline parameter set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LifecycleEvent {
    pub request_type: Option<RequestType>,

    pub resource_properties: Map<String, Value>,

    /// Previous configuration, present only on update.
    pub old_resource_properties: Option<Map<String, Value>>,

    /// The pipeline id assigned at creation, present on update/delete.
    pub physical_resource_id: Option<String>,
}

impl LifecycleEvent {
    /// Look up a desired-state property by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.resource_properties.get(name)
    }

    /// Look up a previous-state property by name.
    pub fn old_property(&self, name: &str) -> Option<&Value> {
        self.old_resource_properties
            .as_ref()
            .and_then(|props| props.get(name))
    }

    /// True when the property is present and carries a usable value.
    ///
    /// The original handler validated with a JS falsiness check, so `null`,
    /// `false`, `""` and `0` all count as unset.
    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some_and(is_truthy)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Success payload for create/update, echoed back to CloudFormation.
///
/// Key casing is part of the wire contract: `physicalResourceId` becomes the
/// resource's physical id and `Arn` is exposed via `Fn::GetAtt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceData {
    #[serde(rename = "physicalResourceId")]
    pub physical_resource_id: String,

    #[serde(rename = "Arn")]
    pub arn: String,
}
