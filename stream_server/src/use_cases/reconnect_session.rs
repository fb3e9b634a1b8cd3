use crate::domain::errors::SessionError;
use crate::domain::ports::{StreamingApi, TokenStore};
use crate::domain::streaming::ReconnectSessionRequest;
use crate::interface_adapters::protocol::ReconnectStreamSessionRequest;
use crate::use_cases::require;

// Reconnect use case with injected dependencies.
pub struct ReconnectSessionUseCase<S, A> {
    pub store: S,
    pub api: A,
}

impl<S, A> ReconnectSessionUseCase<S, A>
where
    S: TokenStore,
    A: StreamingApi,
{
    // Returns the signal answer for the new connection.
    pub async fn execute(
        &self,
        payload: ReconnectStreamSessionRequest,
    ) -> Result<String, SessionError> {
        let token = require(payload.token, "Token")?;
        let signal_request = require(payload.signal_request, "SignalRequest")?;

        let record = self.store.get(&token).await.ok_or(SessionError::NotFound)?;

        let answer = self
            .api
            .create_session_connection(ReconnectSessionRequest {
                stream_group_id: record.stream_group_id,
                stream_session_arn: record.stream_session_arn,
                signal_request,
            })
            .await?;

        Ok(answer)
    }
}
