use thiserror::Error;

// Failure reported by the streaming SDK.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SdkError(pub String);

// Failure talking to the session server.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(String),
    #[error("HTTP error: {status}")]
    Upstream { status: u16, message: Option<String> },
    #[error("API response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Sdk(#[from] SdkError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Timed out waiting for signal response")]
    Timeout { attempts: u32 },
    #[error("Connection attempt cancelled")]
    Cancelled,
    #[error("Session may have expired")]
    MissingToken,
}
