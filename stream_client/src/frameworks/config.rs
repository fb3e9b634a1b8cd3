use std::{env, time::Duration};

use crate::use_cases::PollPolicy;

// Client runtime settings read from the environment.

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn server_url() -> String {
    server_url_from(|key| env::var(key).ok())
}

pub fn poll_policy() -> PollPolicy {
    poll_policy_from(|key| env::var(key).ok())
}

pub fn request_timeout() -> Duration {
    request_timeout_from(|key| env::var(key).ok())
}

pub fn server_url_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("STREAM_SERVER_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

// Unparseable or zero values fall back to the defaults.
pub fn poll_policy_from<F>(lookup: F) -> PollPolicy
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = PollPolicy::default();
    let interval = positive_u64(lookup("STREAM_POLL_INTERVAL_MS"))
        .map(Duration::from_millis)
        .unwrap_or(defaults.interval);
    let max_attempts = lookup("STREAM_POLL_MAX_ATTEMPTS")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(defaults.max_attempts);

    PollPolicy {
        interval,
        max_attempts,
    }
}

pub fn request_timeout_from<F>(lookup: F) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    positive_u64(lookup("STREAM_REQUEST_TIMEOUT_MS"))
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

fn positive_u64(value: Option<String>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}
