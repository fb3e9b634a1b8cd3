use std::collections::HashMap;

// Boundary types exchanged with the streaming API port. They carry no
// serialization; the adapter maps them onto the AWS SDK builders.

// Protocol value sent on every session start.
pub const STREAM_PROTOCOL: &str = "WebRTC";

#[derive(Clone, Debug, PartialEq)]
pub struct StartSessionRequest {
    pub stream_group_id: String,
    pub user_id: String,
    pub signal_request: String,
    pub connection_timeout_seconds: u32,
    pub session_length_seconds: u32,
    pub application_identifier: Option<String>,
    pub locations: Option<Vec<String>>,
    pub additional_launch_args: Option<Vec<String>>,
    pub additional_environment_variables: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartedSession {
    pub arn: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconnectSessionRequest {
    pub stream_group_id: String,
    pub stream_session_arn: String,
    pub signal_request: String,
}

// Session status as reported by the cloud API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteStatus {
    Activating,
    Active,
    Other(String),
}

impl RemoteStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "ACTIVATING" => RemoteStatus::Activating,
            "ACTIVE" => RemoteStatus::Active,
            other => RemoteStatus::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSession {
    pub status: RemoteStatus,
    pub signal_response: Option<String>,
}
