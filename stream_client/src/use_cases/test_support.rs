use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    ApiError, MetricsReporter, Panel, SdkError, SessionApi, StatusView, StreamSdk, TokenLocation,
};

// SDK calls observed by the fake, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SdkCall {
    GenerateSignalRequest,
    ProcessSignalResponse(String),
    AttachInput,
    DetachInput,
    Close,
}

#[derive(Clone, Default)]
pub(crate) struct FakeSdk {
    calls: Arc<Mutex<Vec<SdkCall>>>,
    offers: Arc<AtomicU32>,
    pub fail_generate: bool,
    pub fail_process: bool,
}

impl FakeSdk {
    pub(crate) fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn count(&self, call: &SdkCall) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    fn record(&self, call: SdkCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }
}

#[async_trait]
impl StreamSdk for FakeSdk {
    async fn generate_signal_request(&self) -> Result<String, SdkError> {
        self.record(SdkCall::GenerateSignalRequest);
        if self.fail_generate {
            return Err(SdkError("no media devices".to_string()));
        }
        let n = self.offers.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("offer-{n}"))
    }

    async fn process_signal_response(&self, signal_response: &str) -> Result<(), SdkError> {
        self.record(SdkCall::ProcessSignalResponse(signal_response.to_string()));
        if self.fail_process {
            return Err(SdkError("bad answer".to_string()));
        }
        Ok(())
    }

    fn attach_input(&self) {
        self.record(SdkCall::AttachInput);
    }

    fn detach_input(&self) {
        self.record(SdkCall::DetachInput);
    }

    fn close(&self) {
        self.record(SdkCall::Close);
    }
}

// Requests observed by the fake session API, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiCall {
    Create(String),
    Poll(String),
    Reconnect { token: String, signal_request: String },
    Destroy(String),
}

#[derive(Clone, Copy, Default)]
pub(crate) struct ApiFailures {
    pub create: bool,
    pub poll: bool,
    pub reconnect: bool,
    pub destroy: bool,
}

#[derive(Clone, Default)]
pub(crate) struct FakeSessionApi {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    // Scripted poll answers; an empty queue answers "" forever.
    answers: Arc<Mutex<VecDeque<String>>>,
    failures: ApiFailures,
}

impl FakeSessionApi {
    pub(crate) fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let api = Self::default();
        api.answers
            .lock()
            .expect("answers mutex poisoned")
            .extend(answers.into_iter().map(Into::into));
        api
    }

    pub(crate) fn with_failures(mut self, failures: ApiFailures) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(crate) fn poll_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Poll(_)))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }

    fn upstream(status: u16) -> ApiError {
        ApiError::Upstream {
            status,
            message: None,
        }
    }
}

#[async_trait]
impl SessionApi for FakeSessionApi {
    async fn create_stream_session(&self, signal_request: &str) -> Result<String, ApiError> {
        self.record(ApiCall::Create(signal_request.to_string()));
        if self.failures.create {
            return Err(Self::upstream(502));
        }
        Ok("T".to_string())
    }

    async fn get_signal_response(&self, token: &str) -> Result<String, ApiError> {
        self.record(ApiCall::Poll(token.to_string()));
        if self.failures.poll {
            return Err(Self::upstream(404));
        }
        let next = self
            .answers
            .lock()
            .expect("answers mutex poisoned")
            .pop_front();
        Ok(next.unwrap_or_default())
    }

    async fn reconnect_stream_session(
        &self,
        token: &str,
        signal_request: &str,
    ) -> Result<String, ApiError> {
        self.record(ApiCall::Reconnect {
            token: token.to_string(),
            signal_request: signal_request.to_string(),
        });
        if self.failures.reconnect {
            return Err(Self::upstream(404));
        }
        Ok(format!("reconnect-answer-{signal_request}"))
    }

    async fn destroy_stream_session(&self, token: &str) -> Result<(), ApiError> {
        self.record(ApiCall::Destroy(token.to_string()));
        if self.failures.destroy {
            return Err(Self::upstream(502));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryLocation {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryLocation {
    pub(crate) fn with_token(token: &str) -> Self {
        let location = Self::default();
        location.persist_token(token);
        location
    }
}

impl TokenLocation for MemoryLocation {
    fn token(&self) -> Option<String> {
        self.token.lock().expect("token mutex poisoned").clone()
    }

    fn persist_token(&self, token: &str) {
        *self.token.lock().expect("token mutex poisoned") = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.lock().expect("token mutex poisoned") = None;
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingView {
    panels: Arc<Mutex<Vec<Panel>>>,
    statuses: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
    reconnect_available: Arc<Mutex<Option<bool>>>,
}

impl RecordingView {
    pub(crate) fn current_panel(&self) -> Option<Panel> {
        self.panels.lock().expect("panels mutex poisoned").last().copied()
    }

    pub(crate) fn statuses(&self) -> Vec<String> {
        self.statuses.lock().expect("statuses mutex poisoned").clone()
    }

    pub(crate) fn last_error(&self) -> Option<String> {
        self.errors.lock().expect("errors mutex poisoned").last().cloned()
    }

    pub(crate) fn reconnect_available(&self) -> Option<bool> {
        *self
            .reconnect_available
            .lock()
            .expect("reconnect mutex poisoned")
    }
}

impl StatusView for RecordingView {
    fn show_panel(&self, panel: Panel) {
        self.panels.lock().expect("panels mutex poisoned").push(panel);
    }

    fn update_status(&self, message: &str) {
        self.statuses
            .lock()
            .expect("statuses mutex poisoned")
            .push(message.to_string());
    }

    fn show_error(&self, message: &str) {
        self.errors
            .lock()
            .expect("errors mutex poisoned")
            .push(message.to_string());
        self.show_panel(Panel::Error);
    }

    fn set_reconnect_available(&self, available: bool) {
        *self
            .reconnect_available
            .lock()
            .expect("reconnect mutex poisoned") = Some(available);
    }
}

#[derive(Clone, Default)]
pub(crate) struct CountingReporter {
    samples: Arc<AtomicU32>,
}

impl CountingReporter {
    pub(crate) fn count(&self) -> u32 {
        self.samples.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricsReporter for CountingReporter {
    async fn sample(&self) {
        self.samples.fetch_add(1, Ordering::SeqCst);
    }
}
