use thiserror::Error;

// Domain-level errors for stream session workflows.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
    // Unknown and expired tokens share this variant.
    #[error("token not found")]
    NotFound,
    #[error("stream session is not available (status {0})")]
    SessionUnavailable(String),
    #[error("upstream call failed: {0}")]
    UpstreamFailure(#[from] StreamingApiError),
}

// Failure reported by the streaming API adapter.
#[derive(Debug, Error)]
#[error("{operation} failed: {message}")]
pub struct StreamingApiError {
    pub operation: &'static str,
    pub message: String,
}

impl StreamingApiError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
