//! Elastic Transcoder pipeline API surface used by the lifecycle handler.
//!
//! The handler talks to the service through the [`PipelineApi`] trait so the
//! lifecycle logic can be exercised against a stub; [`ElasticTranscoderClient`]
//! is the production implementation.

mod client;

pub use client::ElasticTranscoderClient;

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SNS topics notified as a job moves through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Notifications {
    pub progressing: Option<String>,
    pub completed: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// A grant on transcoded output objects.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Permission {
    pub grantee_type: Option<String>,
    pub grantee: Option<String>,
    pub access: Vec<String>,
}

/// Destination settings for transcoded content or thumbnails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OutputConfig {
    pub bucket: Option<String>,
    pub storage_class: Option<String>,
    pub permissions: Vec<Permission>,
}

/// The pipeline configuration accepted by the create/update calls
/// (Elastic Transcoder API version 2012-09-25).
///
/// Built from a lifecycle event's `ResourceProperties` map; keys outside the
/// pipeline parameter set — notably the framework-injected `ServiceToken` —
/// are dropped by the projection, so caller-owned data is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PipelineParams {
    pub name: Option<String>,
    pub input_bucket: Option<String>,
    pub output_bucket: Option<String>,
    pub role: Option<String>,
    pub aws_kms_key_arn: Option<String>,
    pub notifications: Option<Notifications>,
    pub content_config: Option<OutputConfig>,
    pub thumbnail_config: Option<OutputConfig>,
}

impl PipelineParams {
    /// Project a resource property map onto the pipeline parameter set.
    pub fn from_properties(properties: &Map<String, Value>) -> Result<Self, ApiError> {
        serde_json::from_value(Value::Object(properties.clone())).map_err(|err| {
            ApiError::new(None, format!("Invalid pipeline properties: {}", err))
        })
    }
}

/// The slice of a pipeline the handler reports back to CloudFormation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub id: String,
    pub arn: String,
}

/// The three pipeline operations the lifecycle handler drives.
#[async_trait::async_trait]
pub trait PipelineApi: Send + Sync {
    /// Create a pipeline from the given configuration.
    async fn create_pipeline(&self, params: &PipelineParams) -> Result<Pipeline, ApiError>;

    /// Update an existing pipeline. `OutputBucket` is not part of the update
    /// surface; callers must clear it before projecting.
    async fn update_pipeline(&self, id: &str, params: &PipelineParams)
        -> Result<Pipeline, ApiError>;

    /// Delete a pipeline by id.
    async fn delete_pipeline(&self, id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn properties(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn projection_drops_service_token() {
        let props = properties(json!({
            "ServiceToken": "arn:aws:lambda:us-east-1:123:function:handler",
            "Name": "pipeline",
            "InputBucket": "in",
            "OutputBucket": "out",
            "Role": "arn:aws:iam::123:role/transcoder"
        }));

        let params = PipelineParams::from_properties(&props).unwrap();
        assert_eq!(params.name.as_deref(), Some("pipeline"));
        assert_eq!(params.input_bucket.as_deref(), Some("in"));
        assert_eq!(params.output_bucket.as_deref(), Some("out"));
        assert_eq!(params.role.as_deref(), Some("arn:aws:iam::123:role/transcoder"));

        // The token must not survive a round-trip back to JSON either.
        let round_trip = serde_json::to_value(&params).unwrap();
        assert!(round_trip.get("ServiceToken").is_none());
    }

    #[test]
    fn projection_parses_nested_configs() {
        let props = properties(json!({
            "Name": "pipeline",
            "InputBucket": "in",
            "Role": "role",
            "AwsKmsKeyArn": "arn:aws:kms:us-east-1:123:key/abc",
            "Notifications": {
                "Progressing": "arn:aws:sns:us-east-1:123:progressing",
                "Error": "arn:aws:sns:us-east-1:123:error"
            },
            "ContentConfig": {
                "Bucket": "content",
                "StorageClass": "Standard",
                "Permissions": [
                    { "GranteeType": "Group", "Grantee": "AllUsers", "Access": ["Read"] }
                ]
            },
            "ThumbnailConfig": { "Bucket": "thumbs" }
        }));

        let params = PipelineParams::from_properties(&props).unwrap();
        assert_eq!(params.aws_kms_key_arn.as_deref(), Some("arn:aws:kms:us-east-1:123:key/abc"));

        let notifications = params.notifications.unwrap();
        assert_eq!(notifications.progressing.as_deref(), Some("arn:aws:sns:us-east-1:123:progressing"));
        assert_eq!(notifications.completed, None);
        assert_eq!(notifications.error.as_deref(), Some("arn:aws:sns:us-east-1:123:error"));

        let content = params.content_config.unwrap();
        assert_eq!(content.bucket.as_deref(), Some("content"));
        assert_eq!(content.storage_class.as_deref(), Some("Standard"));
        assert_eq!(content.permissions.len(), 1);
        assert_eq!(content.permissions[0].grantee_type.as_deref(), Some("Group"));
        assert_eq!(content.permissions[0].access, vec!["Read"]);

        let thumbs = params.thumbnail_config.unwrap();
        assert_eq!(thumbs.bucket.as_deref(), Some("thumbs"));
        assert!(thumbs.permissions.is_empty());
    }

    #[test]
    fn projection_rejects_mistyped_properties() {
        let props = properties(json!({
            "Name": "pipeline",
            "Notifications": "not-an-object"
        }));

        let err = PipelineParams::from_properties(&props).unwrap_err();
        assert!(err.message.contains("Invalid pipeline properties"));
    }
}
