use std::{env, path::PathBuf};
use thiserror::Error;

use crate::use_cases::StreamSettings;

// Runtime/server constants and environment lookups.

pub const DEFAULT_CONNECTION_TIMEOUT_SECONDS: u32 = 600;
// GameLift Streams caps a stream at 24 hours.
pub const DEFAULT_SESSION_LENGTH_SECONDS: u32 = 12 * 3600;
pub const DEFAULT_USER_ID: &str = "DefaultUser";

pub fn http_port() -> u16 {
    env::var("HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000)
}

pub fn https_port() -> u16 {
    env::var("HTTPS_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8443)
}

// HTTPS is disabled when either file cannot be loaded.
pub fn tls_files() -> (PathBuf, PathBuf) {
    let cert = env::var("TLS_CERT_FILE").unwrap_or_else(|_| "server.crt".to_string());
    let key = env::var("TLS_KEY_FILE").unwrap_or_else(|_| "server.key".to_string());
    (PathBuf::from(cert), PathBuf::from(key))
}

pub fn client_dir() -> PathBuf {
    PathBuf::from(env::var("CLIENT_DIR").unwrap_or_else(|_| "client".to_string()))
}

pub fn aws_region() -> Option<String> {
    env::var("AWS_REGION").ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

// Read session settings from the process environment.
pub fn stream_settings() -> Result<StreamSettings, ConfigError> {
    stream_settings_from(|key| env::var(key).ok())
}

// Lookup-based variant so parsing can be tested without touching the
// process environment.
pub fn stream_settings_from<F>(lookup: F) -> Result<StreamSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let stream_group_id =
        non_empty("STREAM_GROUP_ID").ok_or(ConfigError::Missing("STREAM_GROUP_ID"))?;

    Ok(StreamSettings {
        stream_group_id,
        default_user_id: non_empty("DEFAULT_USER_ID")
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
        connection_timeout_seconds: parse_seconds(
            "STREAM_CONNECTION_TIMEOUT_SECONDS",
            non_empty("STREAM_CONNECTION_TIMEOUT_SECONDS"),
            DEFAULT_CONNECTION_TIMEOUT_SECONDS,
        )?,
        session_length_seconds: parse_seconds(
            "STREAM_SESSION_LENGTH_SECONDS",
            non_empty("STREAM_SESSION_LENGTH_SECONDS"),
            DEFAULT_SESSION_LENGTH_SECONDS,
        )?,
        application_identifier: non_empty("APPLICATION_IDENTIFIER"),
        locations: lookup("STREAM_LOCATIONS").and_then(|raw| parse_locations(&raw)),
    })
}

fn parse_seconds(
    key: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

// Comma-separated region list, e.g. "us-west-2, us-east-1".
pub fn parse_locations(raw: &str) -> Option<Vec<String>> {
    let locations: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .map(str::to_string)
        .collect();

    if locations.is_empty() {
        None
    } else {
        Some(locations)
    }
}
