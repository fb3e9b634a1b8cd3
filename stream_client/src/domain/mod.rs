mod errors;
mod ports;
mod state;

// Re-export the domain boundary types and ports.
pub use errors::{ApiError, ClientError, SdkError};
pub use ports::{MetricsReporter, SessionApi, StatusView, StreamSdk, TokenLocation};
pub use state::{ConnectionState, Panel, SdkEvent};
