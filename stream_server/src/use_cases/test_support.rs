use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::SessionRecord;
use crate::domain::errors::StreamingApiError;
use crate::domain::ports::{Clock, StreamingApi, TokenStore};
use crate::domain::streaming::{
    ReconnectSessionRequest, RemoteSession, RemoteStatus, StartSessionRequest, StartedSession,
};
use crate::use_cases::StreamSettings;

pub(crate) type RecordTable = Arc<Mutex<HashMap<String, SessionRecord>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

pub(crate) fn settings() -> StreamSettings {
    StreamSettings {
        stream_group_id: "sg-test".to_string(),
        default_user_id: "DefaultUser".to_string(),
        connection_timeout_seconds: 600,
        session_length_seconds: 43_200,
        application_identifier: None,
        locations: None,
    }
}

pub(crate) fn record(created_at_ms: u64) -> SessionRecord {
    SessionRecord {
        stream_group_id: "sg-test".to_string(),
        stream_session_arn: "arn:aws:gameliftstreams:session/1".to_string(),
        created_at_ms,
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingStore {
    records: RecordTable,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_test_record(&self, token: impl Into<String>, record: SessionRecord) {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        guard.insert(token.into(), record);
    }

    pub(crate) fn get_test_record(&self, token: &str) -> Option<SessionRecord> {
        let guard = self.records.lock().expect("records mutex poisoned");
        guard.get(token).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().expect("records mutex poisoned").len()
    }
}

#[async_trait]
impl TokenStore for RecordingStore {
    async fn insert(&self, token: String, record: SessionRecord) {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        guard.insert(token, record);
    }

    async fn get(&self, token: &str) -> Option<SessionRecord> {
        let guard = self.records.lock().expect("records mutex poisoned");
        guard.get(token).cloned()
    }

    async fn remove(&self, token: &str) -> bool {
        let mut guard = self.records.lock().expect("records mutex poisoned");
        guard.remove(token).is_some()
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub start: bool,
    pub get: bool,
    pub connect: bool,
    pub terminate: bool,
}

// Calls observed by the fake streaming API, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ApiCall {
    Start(StartSessionRequest),
    Get { arn: String },
    Connect(ReconnectSessionRequest),
    Terminate { arn: String },
}

#[derive(Clone)]
pub(crate) struct FakeStreamingApi {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    remote: Arc<Mutex<RemoteSession>>,
    failures: FailureFlags,
}

impl FakeStreamingApi {
    pub(crate) fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            remote: Arc::new(Mutex::new(RemoteSession {
                status: RemoteStatus::Activating,
                signal_response: None,
            })),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn set_remote(&self, status: RemoteStatus, signal_response: Option<&str>) {
        let mut guard = self.remote.lock().expect("remote mutex poisoned");
        *guard = RemoteSession {
            status,
            signal_response: signal_response.map(str::to_string),
        };
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

#[async_trait]
impl StreamingApi for FakeStreamingApi {
    async fn start_session(
        &self,
        req: StartSessionRequest,
    ) -> Result<StartedSession, StreamingApiError> {
        self.record(ApiCall::Start(req));
        if self.failures.start {
            return Err(StreamingApiError::new("StartStreamSession", "start failed"));
        }
        Ok(StartedSession {
            arn: "arn:aws:gameliftstreams:session/1".to_string(),
        })
    }

    async fn get_session(
        &self,
        _stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<RemoteSession, StreamingApiError> {
        self.record(ApiCall::Get {
            arn: stream_session_arn.to_string(),
        });
        if self.failures.get {
            return Err(StreamingApiError::new("GetStreamSession", "get failed"));
        }
        Ok(self.remote.lock().expect("remote mutex poisoned").clone())
    }

    async fn create_session_connection(
        &self,
        req: ReconnectSessionRequest,
    ) -> Result<String, StreamingApiError> {
        let answer = format!("answer-for-{}", req.signal_request);
        self.record(ApiCall::Connect(req));
        if self.failures.connect {
            return Err(StreamingApiError::new(
                "CreateStreamSessionConnection",
                "connect failed",
            ));
        }
        Ok(answer)
    }

    async fn terminate_session(
        &self,
        _stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<(), StreamingApiError> {
        self.record(ApiCall::Terminate {
            arn: stream_session_arn.to_string(),
        });
        if self.failures.terminate {
            return Err(StreamingApiError::new("TerminateStreamSession", "terminate failed"));
        }
        Ok(())
    }
}
