use crate::domain::errors::StreamingApiError;
use crate::domain::ports::StreamingApi;
use crate::domain::streaming::{
    ReconnectSessionRequest, RemoteSession, RemoteStatus, STREAM_PROTOCOL, StartSessionRequest,
    StartedSession,
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_gameliftstreams::Client;
use aws_sdk_gameliftstreams::error::DisplayErrorContext;
use aws_sdk_gameliftstreams::types::{Protocol, StreamSessionStatus};
use thiserror::Error;

// Thin wrapper around the AWS SDK client for GameLift Streams.
#[derive(Clone)]
pub struct GameLiftStreamsClient {
    sdk: Client,
}

#[derive(Debug, Error)]
pub enum GameLiftClientError {
    #[error("unable to determine region, use \"aws configure\" or set AWS_REGION")]
    MissingRegion,
}

impl GameLiftStreamsClient {
    // Resolve credentials and region from the default AWS provider chain.
    pub async fn from_env(region: Option<String>) -> Result<Self, GameLiftClientError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        if config.region().is_none() {
            return Err(GameLiftClientError::MissingRegion);
        }

        Ok(Self {
            sdk: Client::new(&config),
        })
    }
}

fn sdk_error<E>(operation: &'static str, err: E) -> StreamingApiError
where
    E: std::error::Error,
{
    StreamingApiError::new(operation, DisplayErrorContext(err).to_string())
}

// The AWS API caps these at i32; larger configured values are clamped.
fn as_api_seconds(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[async_trait]
impl StreamingApi for GameLiftStreamsClient {
    async fn start_session(
        &self,
        req: StartSessionRequest,
    ) -> Result<StartedSession, StreamingApiError> {
        let output = self
            .sdk
            .start_stream_session()
            .identifier(req.stream_group_id)
            .protocol(Protocol::from(STREAM_PROTOCOL))
            .signal_request(req.signal_request)
            .user_id(req.user_id)
            .connection_timeout_seconds(as_api_seconds(req.connection_timeout_seconds))
            .session_length_seconds(as_api_seconds(req.session_length_seconds))
            .set_application_identifier(req.application_identifier)
            .set_locations(req.locations)
            .set_additional_launch_args(req.additional_launch_args)
            .set_additional_environment_variables(req.additional_environment_variables)
            .send()
            .await
            .map_err(|err| sdk_error("StartStreamSession", err))?;

        let arn: Option<&str> = output.arn().into();
        let arn = arn.ok_or_else(|| {
            StreamingApiError::new("StartStreamSession", "response did not include an Arn")
        })?;

        Ok(StartedSession {
            arn: arn.to_string(),
        })
    }

    async fn get_session(
        &self,
        stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<RemoteSession, StreamingApiError> {
        let output = self
            .sdk
            .get_stream_session()
            .identifier(stream_group_id)
            .stream_session_identifier(stream_session_arn)
            .send()
            .await
            .map_err(|err| sdk_error("GetStreamSession", err))?;

        let status: Option<&StreamSessionStatus> = output.status().into();
        let signal_response: Option<&str> = output.signal_response().into();

        Ok(RemoteSession {
            status: RemoteStatus::parse(status.map(StreamSessionStatus::as_str).unwrap_or("")),
            signal_response: signal_response.map(str::to_string),
        })
    }

    async fn create_session_connection(
        &self,
        req: ReconnectSessionRequest,
    ) -> Result<String, StreamingApiError> {
        let output = self
            .sdk
            .create_stream_session_connection()
            .identifier(req.stream_group_id)
            .stream_session_identifier(req.stream_session_arn)
            .signal_request(req.signal_request)
            .send()
            .await
            .map_err(|err| sdk_error("CreateStreamSessionConnection", err))?;

        let signal_response: Option<&str> = output.signal_response().into();
        Ok(signal_response.unwrap_or_default().to_string())
    }

    async fn terminate_session(
        &self,
        stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<(), StreamingApiError> {
        self.sdk
            .terminate_stream_session()
            .identifier(stream_group_id)
            .stream_session_identifier(stream_session_arn)
            .send()
            .await
            .map_err(|err| sdk_error("TerminateStreamSession", err))?;

        Ok(())
    }
}
