//! CloudFormation custom resource handler for Elastic Transcoder pipelines.
//!
//! CloudFormation has no native resource type for Elastic Transcoder, so a
//! custom resource delivers lifecycle events (create/update/delete) to this
//! handler, which translates them into pipeline API calls and reports back
//! the pipeline id and ARN.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod transcoder;

pub use error::{Error, Result};
pub use handler::PipelineHandler;
