use async_trait::async_trait;

use crate::domain::errors::{ApiError, SdkError};
use crate::domain::state::Panel;

// Streaming SDK capability: offer/answer exchange plus input and teardown.
#[async_trait]
pub trait StreamSdk: Send + Sync {
    async fn generate_signal_request(&self) -> Result<String, SdkError>;
    async fn process_signal_response(&self, signal_response: &str) -> Result<(), SdkError>;
    fn attach_input(&self);
    fn detach_input(&self);
    fn close(&self);
}

// Session server API. Signal answers are empty while the session is pending.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn create_stream_session(&self, signal_request: &str) -> Result<String, ApiError>;
    async fn get_signal_response(&self, token: &str) -> Result<String, ApiError>;
    async fn reconnect_stream_session(
        &self,
        token: &str,
        signal_request: &str,
    ) -> Result<String, ApiError>;
    async fn destroy_stream_session(&self, token: &str) -> Result<(), ApiError>;
}

// Where the connection token survives page reloads (the address bar).
pub trait TokenLocation: Send + Sync {
    fn token(&self) -> Option<String>;
    fn persist_token(&self, token: &str);
    fn clear_token(&self);
}

// UI surface. `show_error` also switches to the error panel.
pub trait StatusView: Send + Sync {
    fn show_panel(&self, panel: Panel);
    fn update_status(&self, message: &str);
    fn show_error(&self, message: &str);
    fn set_reconnect_available(&self, available: bool);
}

// One metrics sample per sampler tick while streaming.
#[async_trait]
pub trait MetricsReporter: Send + Sync {
    async fn sample(&self);
}
