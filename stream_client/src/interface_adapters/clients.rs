use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::{ApiError, SessionApi};
use crate::interface_adapters::protocol::{
    CreateStreamSessionRequest, CreateStreamSessionResponse, ErrorResponse,
    ReconnectStreamSessionRequest, SignalResponsePayload, TokenRequest,
};

// Thin reqwest client for the session server's JSON API.
#[derive(Clone)]
pub struct HttpSessionApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSessionApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/api/{path}", self.base_url);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are advisory; the status code is what callers act on.
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error);
            tracing::warn!(
                %path,
                status = status.as_u16(),
                ?message,
                "session server returned an error"
            );
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn create_stream_session(&self, signal_request: &str) -> Result<String, ApiError> {
        let response: CreateStreamSessionResponse = self
            .post(
                "CreateStreamSession",
                &CreateStreamSessionRequest { signal_request },
            )
            .await?;
        Ok(response.token)
    }

    async fn get_signal_response(&self, token: &str) -> Result<String, ApiError> {
        let response: SignalResponsePayload = self
            .post("GetSignalResponse", &TokenRequest { token })
            .await?;
        Ok(response.signal_response)
    }

    async fn reconnect_stream_session(
        &self,
        token: &str,
        signal_request: &str,
    ) -> Result<String, ApiError> {
        let response: SignalResponsePayload = self
            .post(
                "ReconnectStreamSession",
                &ReconnectStreamSessionRequest {
                    token,
                    signal_request,
                },
            )
            .await?;
        Ok(response.signal_response)
    }

    async fn destroy_stream_session(&self, token: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post("DestroyStreamSession", &TokenRequest { token })
            .await?;
        Ok(())
    }
}
