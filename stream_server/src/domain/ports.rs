use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::SessionRecord;
use crate::domain::errors::StreamingApiError;
use crate::domain::streaming::{
    ReconnectSessionRequest, RemoteSession, StartSessionRequest, StartedSession,
};

// Port for the connection token table used by session use cases.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, token: String, record: SessionRecord);
    async fn get(&self, token: &str) -> Option<SessionRecord>;
    async fn remove(&self, token: &str) -> bool;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}

// The handlers depend on this trait, not on the AWS SDK client.
#[async_trait]
pub trait StreamingApi: Send + Sync {
    async fn start_session(
        &self,
        req: StartSessionRequest,
    ) -> Result<StartedSession, StreamingApiError>;

    async fn get_session(
        &self,
        stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<RemoteSession, StreamingApiError>;

    async fn create_session_connection(
        &self,
        req: ReconnectSessionRequest,
    ) -> Result<String, StreamingApiError>;

    async fn terminate_session(
        &self,
        stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<(), StreamingApiError>;
}

// Lets use cases take the shared `Arc<dyn StreamingApi>` held in app state.
#[async_trait]
impl<T> StreamingApi for Arc<T>
where
    T: StreamingApi + ?Sized,
{
    async fn start_session(
        &self,
        req: StartSessionRequest,
    ) -> Result<StartedSession, StreamingApiError> {
        (**self).start_session(req).await
    }

    async fn get_session(
        &self,
        stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<RemoteSession, StreamingApiError> {
        (**self)
            .get_session(stream_group_id, stream_session_arn)
            .await
    }

    async fn create_session_connection(
        &self,
        req: ReconnectSessionRequest,
    ) -> Result<String, StreamingApiError> {
        (**self).create_session_connection(req).await
    }

    async fn terminate_session(
        &self,
        stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<(), StreamingApiError> {
        (**self)
            .terminate_session(stream_group_id, stream_session_arn)
            .await
    }
}
