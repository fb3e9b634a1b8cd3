use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::SessionRecord;
use crate::domain::errors::SessionError;
use crate::domain::ports::{Clock, StreamingApi, TokenStore};
use crate::domain::streaming::StartSessionRequest;
use crate::interface_adapters::protocol::CreateStreamSessionRequest;
use crate::use_cases::{StreamSettings, require};

// Response returned by the create use case.
pub struct CreateSessionResponse {
    pub token: String,
    pub stream_session_arn: String,
}

// Create stream session use case with injected dependencies.
pub struct CreateSessionUseCase<C, S, A> {
    pub clock: C,
    pub store: S,
    pub api: A,
    pub settings: Arc<StreamSettings>,
}

impl<C, S, A> CreateSessionUseCase<C, S, A>
where
    C: Clock,
    S: TokenStore,
    A: StreamingApi,
{
    pub async fn execute(
        &self,
        payload: CreateStreamSessionRequest,
    ) -> Result<CreateSessionResponse, SessionError> {
        let signal_request = require(payload.signal_request, "SignalRequest")?;

        let user_id = payload
            .user_id
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.settings.default_user_id.clone());

        let request = StartSessionRequest {
            stream_group_id: self.settings.stream_group_id.clone(),
            user_id,
            signal_request,
            connection_timeout_seconds: self.settings.connection_timeout_seconds,
            session_length_seconds: self.settings.session_length_seconds,
            application_identifier: self.settings.application_identifier.clone(),
            locations: self.settings.locations.clone(),
            additional_launch_args: payload.additional_launch_args,
            additional_environment_variables: payload.additional_environment_variables,
        };

        let started = self.api.start_session(request).await?;

        // The token is only minted once the upstream session exists.
        let token = Uuid::new_v4().to_string();
        let record = SessionRecord {
            stream_group_id: self.settings.stream_group_id.clone(),
            stream_session_arn: started.arn.clone(),
            created_at_ms: self.clock.now_epoch_millis(),
        };
        self.store.insert(token.clone(), record).await;

        Ok(CreateSessionResponse {
            token,
            stream_session_arn: started.arn,
        })
    }
}
