use crate::domain::errors::SessionError;
use crate::domain::ports::{Clock, StreamingApi, TokenStore};
use crate::domain::streaming::RemoteStatus;
use crate::use_cases::{SignalState, require};

// Signal poll use case with injected dependencies.
pub struct GetSignalResponseUseCase<C, S, A> {
    pub clock: C,
    pub store: S,
    pub api: A,
    pub connection_timeout_ms: u64,
}

impl<C, S, A> GetSignalResponseUseCase<C, S, A>
where
    C: Clock,
    S: TokenStore,
    A: StreamingApi,
{
    pub async fn execute(&self, token: Option<String>) -> Result<SignalState, SessionError> {
        let token = require(token, "Token")?;

        let record = self.store.get(&token).await.ok_or(SessionError::NotFound)?;

        // Expired tokens stay in the store until their retention timer fires;
        // they are only refused here.
        if record.is_expired(self.clock.now_epoch_millis(), self.connection_timeout_ms) {
            return Err(SessionError::NotFound);
        }

        let remote = self
            .api
            .get_session(&record.stream_group_id, &record.stream_session_arn)
            .await?;

        match remote.status {
            RemoteStatus::Activating => Ok(SignalState::Pending),
            RemoteStatus::Active => Ok(remote
                .signal_response
                .filter(|answer| !answer.is_empty())
                .map_or(SignalState::Pending, SignalState::Ready)),
            RemoteStatus::Other(status) => Err(SessionError::SessionUnavailable(status)),
        }
    }
}
