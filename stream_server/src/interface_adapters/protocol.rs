use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Wire names follow the web client, which posts PascalCase fields.
// Every request field is optional so missing values are reported as 400
// by the use cases instead of a 422 from the JSON extractor.

// Request payload for starting a new stream session.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CreateStreamSessionRequest {
    pub signal_request: Option<String>,
    pub user_id: Option<String>,
    pub additional_launch_args: Option<Vec<String>>,
    pub additional_environment_variables: Option<HashMap<String, String>>,
}

// Response payload carrying the connection token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStreamSessionResponse {
    pub token: String,
}

// Request payload for polling the signal answer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetSignalResponseRequest {
    pub token: Option<String>,
}

// Signal answer; empty while the session is still activating.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignalResponsePayload {
    pub signal_response: String,
}

// Request payload for reconnecting to an existing session.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReconnectStreamSessionRequest {
    pub token: Option<String>,
    pub signal_request: Option<String>,
}

// Request payload for terminating a session.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DestroyStreamSessionRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DestroyStreamSessionResponse {
    pub success: bool,
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
