use serde::{Deserialize, Serialize};

// Request/response bodies for the session server, PascalCase on the wire.

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStreamSessionRequest<'a> {
    pub signal_request: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStreamSessionResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReconnectStreamSessionRequest<'a> {
    pub token: &'a str,
    pub signal_request: &'a str,
}

// Answer is empty while the session is still activating.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignalResponsePayload {
    #[serde(default)]
    pub signal_response: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
