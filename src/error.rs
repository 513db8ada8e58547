//! Error types for the pipeline lifecycle handler.

/// Errors surfaced by the lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required pipeline property is absent (or empty) in the event.
    #[error("Missing required property {0}")]
    MissingProperty(&'static str),

    /// `OutputBucket` differs between the desired and previous configuration.
    /// The update API does not accept the field, so the change cannot be
    /// applied in place.
    #[error("OutputBucket cannot be changed. It is not supported by the AWS SDK")]
    OutputBucketChanged,

    /// The lifecycle event itself is malformed.
    #[error("Invalid lifecycle event: {0}")]
    InvalidEvent(String),

    /// The Elastic Transcoder API returned an error.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An error returned by the remote pipeline API, preserving the AWS error
/// code so callers can distinguish cases like `ResourceNotFoundException`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(code: Option<String>, message: S) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// True when the remote resource no longer exists.
    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some("ResourceNotFoundException")
    }
}

/// Result type alias using the handler error type.
pub type Result<T> = std::result::Result<T, Error>;
