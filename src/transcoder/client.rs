use crate::config::Config;
use crate::error::ApiError;
use crate::transcoder::{Notifications, OutputConfig, Permission, Pipeline, PipelineApi, PipelineParams};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_elastictranscoder::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_elastictranscoder::types;
use aws_sdk_elastictranscoder::Client;

/// Elastic Transcoder client backed by the AWS SDK.
///
/// Credentials, retries and timeouts all come from the SDK's default chain;
/// the handler adds no retry logic of its own.
pub struct ElasticTranscoderClient {
    client: Client,
}

impl ElasticTranscoderClient {
    /// Build a client from the SDK default configuration, with optional
    /// region and endpoint overrides from the handler config.
    pub async fn new(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        let client = match &config.endpoint_url {
            Some(endpoint) => {
                tracing::debug!("Using Elastic Transcoder endpoint override: {}", endpoint);
                let conf = aws_sdk_elastictranscoder::config::Builder::from(&sdk_config)
                    .endpoint_url(endpoint)
                    .build();
                Client::from_conf(conf)
            }
            None => Client::new(&sdk_config),
        };

        Self { client }
    }
}

#[async_trait::async_trait]
impl PipelineApi for ElasticTranscoderClient {
    async fn create_pipeline(&self, params: &PipelineParams) -> Result<Pipeline, ApiError> {
        tracing::info!("Creating pipeline {:?}", params.name.as_deref().unwrap_or(""));

        let output = self
            .client
            .create_pipeline()
            .set_name(params.name.clone())
            .set_input_bucket(params.input_bucket.clone())
            .set_output_bucket(params.output_bucket.clone())
            .set_role(params.role.clone())
            .set_aws_kms_key_arn(params.aws_kms_key_arn.clone())
            .set_notifications(params.notifications.as_ref().map(to_sdk_notifications))
            .set_content_config(params.content_config.as_ref().map(to_sdk_output_config))
            .set_thumbnail_config(params.thumbnail_config.as_ref().map(to_sdk_output_config))
            .send()
            .await
            .map_err(map_sdk_error)?;

        to_pipeline(output.pipeline)
    }

    async fn update_pipeline(
        &self,
        id: &str,
        params: &PipelineParams,
    ) -> Result<Pipeline, ApiError> {
        tracing::info!("Updating pipeline {}", id);

        // The update call has no OutputBucket parameter; the handler clears
        // the field before projecting, so nothing is silently dropped here.
        let output = self
            .client
            .update_pipeline()
            .id(id)
            .set_name(params.name.clone())
            .set_input_bucket(params.input_bucket.clone())
            .set_role(params.role.clone())
            .set_aws_kms_key_arn(params.aws_kms_key_arn.clone())
            .set_notifications(params.notifications.as_ref().map(to_sdk_notifications))
            .set_content_config(params.content_config.as_ref().map(to_sdk_output_config))
            .set_thumbnail_config(params.thumbnail_config.as_ref().map(to_sdk_output_config))
            .send()
            .await
            .map_err(map_sdk_error)?;

        to_pipeline(output.pipeline)
    }

    async fn delete_pipeline(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!("Deleting pipeline {}", id);

        self.client
            .delete_pipeline()
            .id(id)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(())
    }
}

fn to_sdk_notifications(notifications: &Notifications) -> types::Notifications {
    types::Notifications::builder()
        .set_progressing(notifications.progressing.clone())
        .set_completed(notifications.completed.clone())
        .set_warning(notifications.warning.clone())
        .set_error(notifications.error.clone())
        .build()
}

fn to_sdk_permission(permission: &Permission) -> types::Permission {
    types::Permission::builder()
        .set_grantee_type(permission.grantee_type.clone())
        .set_grantee(permission.grantee.clone())
        .set_access(if permission.access.is_empty() {
            None
        } else {
            Some(permission.access.clone())
        })
        .build()
}

fn to_sdk_output_config(config: &OutputConfig) -> types::PipelineOutputConfig {
    types::PipelineOutputConfig::builder()
        .set_bucket(config.bucket.clone())
        .set_storage_class(config.storage_class.clone())
        .set_permissions(if config.permissions.is_empty() {
            None
        } else {
            Some(config.permissions.iter().map(to_sdk_permission).collect())
        })
        .build()
}

fn to_pipeline(pipeline: Option<types::Pipeline>) -> Result<Pipeline, ApiError> {
    let pipeline =
        pipeline.ok_or_else(|| ApiError::new(None, "Pipeline missing from API response"))?;

    match (pipeline.id, pipeline.arn) {
        (Some(id), Some(arn)) => Ok(Pipeline { id, arn }),
        _ => Err(ApiError::new(
            None,
            "Pipeline in API response missing Id or Arn",
        )),
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let code = err.code().map(str::to_string);
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    ApiError::new(code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_notifications() {
        let notifications = Notifications {
            progressing: Some("arn:progressing".into()),
            completed: None,
            warning: None,
            error: Some("arn:error".into()),
        };

        let sdk = to_sdk_notifications(&notifications);
        assert_eq!(sdk.progressing(), Some("arn:progressing"));
        assert_eq!(sdk.completed(), None);
        assert_eq!(sdk.error(), Some("arn:error"));
    }

    #[test]
    fn converts_output_config_with_permissions() {
        let config = OutputConfig {
            bucket: Some("content".into()),
            storage_class: Some("ReducedRedundancy".into()),
            permissions: vec![Permission {
                grantee_type: Some("Group".into()),
                grantee: Some("AllUsers".into()),
                access: vec!["Read".into()],
            }],
        };

        let sdk = to_sdk_output_config(&config);
        assert_eq!(sdk.bucket(), Some("content"));
        assert_eq!(sdk.storage_class(), Some("ReducedRedundancy"));
        let permissions = sdk.permissions();
        assert_eq!(permissions.len(), 1);
        assert_eq!(permissions[0].grantee_type(), Some("Group"));
        assert_eq!(permissions[0].access(), ["Read".to_string()]);
    }

    #[test]
    fn empty_permissions_map_to_none() {
        let config = OutputConfig {
            bucket: Some("thumbs".into()),
            storage_class: None,
            permissions: vec![],
        };

        let sdk = to_sdk_output_config(&config);
        assert!(sdk.permissions().is_empty());
    }

    #[test]
    fn response_pipeline_maps_to_id_and_arn() {
        let sdk_pipeline = types::Pipeline::builder()
            .id("1234567890123-abcdef")
            .arn("arn:aws:elastictranscoder:us-east-1:123:pipeline/1234567890123-abcdef")
            .build();

        let pipeline = to_pipeline(Some(sdk_pipeline)).unwrap();
        assert_eq!(pipeline.id, "1234567890123-abcdef");

        let err = to_pipeline(None).unwrap_err();
        assert!(err.message.contains("missing from API response"));

        let err = to_pipeline(Some(types::Pipeline::builder().id("only-id").build())).unwrap_err();
        assert!(err.message.contains("missing Id or Arn"));
    }
}
