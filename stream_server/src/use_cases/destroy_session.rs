use crate::domain::errors::SessionError;
use crate::domain::ports::{StreamingApi, TokenStore};
use crate::use_cases::require;

// Destroy use case with injected dependencies.
pub struct DestroySessionUseCase<S, A> {
    pub store: S,
    pub api: A,
}

impl<S, A> DestroySessionUseCase<S, A>
where
    S: TokenStore,
    A: StreamingApi,
{
    pub async fn execute(&self, token: Option<String>) -> Result<(), SessionError> {
        let token = require(token, "Token")?;

        let record = self.store.get(&token).await.ok_or(SessionError::NotFound)?;

        // On failure the token stays valid so the caller can retry.
        self.api
            .terminate_session(&record.stream_group_id, &record.stream_session_arn)
            .await?;

        self.store.remove(&token).await;
        Ok(())
    }
}
