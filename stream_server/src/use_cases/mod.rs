// Use cases layer: session lifecycle workflows for the stream server.

pub mod create_session;
pub mod destroy_session;
pub mod get_signal_response;
pub mod reconnect_session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use types::{SignalState, StreamSettings};

use crate::domain::errors::SessionError;

// Treat absent and blank values the same way.
pub(crate) fn require(
    value: Option<String>,
    name: &'static str,
) -> Result<String, SessionError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SessionError::MissingParameter(name)),
    }
}
