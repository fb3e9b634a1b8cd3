// Wiring for embedding the stream session in a host application.

use crate::domain::{StatusView, StreamSdk, TokenLocation};
use crate::frameworks::config;
use crate::interface_adapters::HttpSessionApi;
use crate::use_cases::lifecycle::StreamSession;
use std::io::Result;

/// Build a session against the configured server. The host supplies the
/// streaming SDK, the page address and the UI surface.
pub fn build_session<S, L, V>(
    sdk: S,
    location: L,
    view: V,
) -> Result<StreamSession<S, HttpSessionApi, L, V>>
where
    S: StreamSdk,
    L: TokenLocation,
    V: StatusView,
{
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let server_url = config::server_url();
    let api = HttpSessionApi::new(server_url.clone(), config::request_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to build HTTP client: {e}")))?;

    let poll_policy = config::poll_policy();
    tracing::info!(
        %server_url,
        interval_ms = poll_policy.interval.as_millis() as u64,
        max_attempts = poll_policy.max_attempts,
        "stream session configured"
    );

    Ok(StreamSession::new(sdk, api, location, view).with_poll_policy(poll_policy))
}
