//! Lifecycle operations for the Elastic Transcoder pipeline custom resource.
//!
//! Each operation is a single request/response exchange with the pipeline
//! API: no retries, no state between invocations. Failures propagate to the
//! caller unchanged except the two idempotence cases on delete (a physical
//! resource id that was never a pipeline, and a pipeline that is already
//! gone).

use crate::error::{Error, Result};
use crate::event::{LifecycleEvent, ResourceData};
use crate::transcoder::{PipelineApi, PipelineParams};
use regex::Regex;
use std::sync::Arc;

/// Shape of an id assigned by Elastic Transcoder at pipeline creation,
/// e.g. `1234567890123-abcdef`. Anything else as a physical resource id
/// means the resource never reached the remote service.
const PIPELINE_ID_PATTERN: &str = r"^\d{13}-\w{6}$";

fn is_pipeline_id(id: &str) -> bool {
    Regex::new(PIPELINE_ID_PATTERN)
        .map(|re| re.is_match(id))
        .unwrap_or(false)
}

/// Check the required pipeline properties before create/update.
///
/// Fields are checked in a fixed order so the reported error is stable:
/// `InputBucket`, then `Name`, then `Role`. No side effects, no API client
/// needed.
pub fn validate(event: &LifecycleEvent) -> Result<()> {
    for field in ["InputBucket", "Name", "Role"] {
        if !event.has_property(field) {
            return Err(Error::MissingProperty(field));
        }
    }
    Ok(())
}

/// Translates custom resource lifecycle events into pipeline API calls.
pub struct PipelineHandler {
    api: Arc<dyn PipelineApi>,
}

impl PipelineHandler {
    pub fn new(api: Arc<dyn PipelineApi>) -> Self {
        Self { api }
    }

    /// Check the required pipeline properties before create/update.
    pub fn validate(&self, event: &LifecycleEvent) -> Result<()> {
        validate(event)
    }

    /// Create the pipeline and report its id and ARN.
    pub async fn create(&self, event: &LifecycleEvent) -> Result<ResourceData> {
        let params = PipelineParams::from_properties(&event.resource_properties)
            .map_err(|err| Error::InvalidEvent(err.message))?;

        let pipeline = self.api.create_pipeline(&params).await?;
        tracing::info!("Created pipeline {}", pipeline.id);

        Ok(ResourceData {
            physical_resource_id: pipeline.id,
            arn: pipeline.arn,
        })
    }

    /// Update the pipeline identified by the event's physical resource id.
    ///
    /// `OutputBucket` is immutable: the update API does not accept the field,
    /// so a changed value fails here before any network call. An unchanged
    /// value is cleared from the parameters instead of being forwarded.
    pub async fn update(&self, event: &LifecycleEvent) -> Result<ResourceData> {
        if event.property("OutputBucket") != event.old_property("OutputBucket") {
            return Err(Error::OutputBucketChanged);
        }

        let mut params = PipelineParams::from_properties(&event.resource_properties)
            .map_err(|err| Error::InvalidEvent(err.message))?;
        params.output_bucket = None;

        let id = event
            .physical_resource_id
            .as_deref()
            .ok_or_else(|| Error::InvalidEvent("update event has no PhysicalResourceId".into()))?;

        let pipeline = self.api.update_pipeline(id, &params).await?;
        tracing::info!("Updated pipeline {}", pipeline.id);

        Ok(ResourceData {
            physical_resource_id: pipeline.id,
            arn: pipeline.arn,
        })
    }

    /// Delete the pipeline identified by the event's physical resource id.
    ///
    /// A physical resource id that does not look like a pipeline id means
    /// creation never succeeded upstream, so there is nothing to delete and
    /// the operation completes without a remote call. A remote
    /// `ResourceNotFoundException` is treated as success for the same reason.
    pub async fn delete(&self, event: &LifecycleEvent) -> Result<()> {
        let id = event.physical_resource_id.as_deref().unwrap_or("");
        if !is_pipeline_id(id) {
            tracing::info!("Physical resource id {:?} is not a pipeline id, skipping delete", id);
            // Complete on the next scheduler turn so this path stays
            // asynchronous like a real delete.
            tokio::task::yield_now().await;
            return Ok(());
        }

        match self.api.delete_pipeline(id).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => {
                tracing::info!("Pipeline {} already deleted", id);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_pipeline_ids() {
        assert!(is_pipeline_id("1234567890123-abcdef"));
        assert!(is_pipeline_id("1234567890123-123456"));

        assert!(!is_pipeline_id(""));
        assert!(!is_pipeline_id("PhysicalResourceId"));
        assert!(!is_pipeline_id("123456789012-abcdef")); // 12 digits
        assert!(!is_pipeline_id("1234567890123-abcde")); // 5 word chars
        assert!(!is_pipeline_id("1234567890123-abcdefg")); // 7 word chars
        assert!(!is_pipeline_id("x1234567890123-abcdef")); // unanchored prefix
    }
}
