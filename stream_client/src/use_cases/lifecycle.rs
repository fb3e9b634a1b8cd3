use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::{
    ApiError, ClientError, ConnectionState, MetricsReporter, Panel, SdkEvent, SessionApi,
    StatusView, StreamSdk, TokenLocation,
};
use crate::use_cases::metrics::MetricsSampler;
use crate::use_cases::retry::{PollCanceller, PollError, PollPolicy, poll_until};

/// Browser-side stream session: the connection token, the SDK handle and the
/// current lifecycle state live here instead of in page globals.
///
/// Lifecycle calls take `&mut self` and are expected to run one at a time.
/// SDK callbacks are fed in through [`StreamSession::handle_event`]. To abort a
/// poll that is still in flight, call `cancel` on the handle returned by
/// [`StreamSession::cancellation`]. One handle covers every later attempt.
pub struct StreamSession<S, A, L, V> {
    sdk: S,
    api: A,
    location: L,
    view: V,
    poll_policy: PollPolicy,
    metrics: MetricsSampler,
    state: ConnectionState,
    token: Option<String>,
    input_enabled: bool,
    canceller: PollCanceller,
}

impl<S, A, L, V> StreamSession<S, A, L, V>
where
    S: StreamSdk,
    A: SessionApi,
    L: TokenLocation,
    V: StatusView,
{
    pub fn new(sdk: S, api: A, location: L, view: V) -> Self {
        Self {
            sdk,
            api,
            location,
            view,
            poll_policy: PollPolicy::default(),
            metrics: MetricsSampler::disabled(),
            state: ConnectionState::Idle,
            token: None,
            input_enabled: false,
            canceller: PollCanceller::default(),
        }
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    pub fn with_metrics(mut self, reporter: Arc<dyn MetricsReporter>, interval: Duration) -> Self {
        self.metrics = MetricsSampler::new(Some(reporter), interval);
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn metrics_running(&self) -> bool {
        self.metrics.is_running()
    }

    /// Handle for aborting whichever connection poll is in flight.
    pub fn cancellation(&self) -> PollCanceller {
        self.canceller.clone()
    }

    /// Page-load entry point. A token in the address means a previous session
    /// may still be alive, so offer reconnection instead of starting afresh.
    pub async fn initialize(&mut self) -> Result<(), ClientError> {
        if let Some(token) = self.location.token() {
            tracing::info!("connection token found in address, offering reconnect");
            self.token = Some(token);
            self.view.set_reconnect_available(true);
            self.view.show_panel(Panel::Disconnected);
            self.transition(ConnectionState::Disconnected);
            return Ok(());
        }

        self.start_streaming().await
    }

    /// Create a new session and poll until its signal answer is ready.
    pub async fn start_streaming(&mut self) -> Result<(), ClientError> {
        let cancel = self.canceller.arm();
        self.transition(ConnectionState::Connecting);
        self.view.show_panel(Panel::Connecting);
        self.view.update_status("Initializing connection...");

        match self.connect(&cancel).await {
            Ok(()) => {
                self.enter_streaming();
                Ok(())
            }
            Err(ClientError::Cancelled) => {
                tracing::info!("connection attempt cancelled");
                self.disconnect();
                Err(ClientError::Cancelled)
            }
            Err(err) => {
                tracing::error!(error = %err, "connection error");
                self.close_sdk();
                self.view.show_error(&format!("Failed to connect: {err}"));
                self.transition(ConnectionState::Error);
                Err(err)
            }
        }
    }

    async fn connect(&mut self, cancel: &CancellationToken) -> Result<(), ClientError> {
        let signal_request = self.sdk.generate_signal_request().await?;

        self.view.update_status("Connecting to GameLift service...");
        let token = self.api.create_stream_session(&signal_request).await?;
        self.token = Some(token.clone());

        self.view.update_status("Waiting for stream to initialize...");
        let signal_response = self.wait_for_signal_response(&token, cancel).await?;

        self.view.update_status("Establishing stream connection...");
        self.sdk.process_signal_response(&signal_response).await?;

        // Keep the token in the address so a reload can reconnect.
        self.location.persist_token(&token);
        self.view.set_reconnect_available(true);
        Ok(())
    }

    async fn wait_for_signal_response(
        &self,
        token: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ClientError> {
        let api = &self.api;
        let view = &self.view;
        let max_attempts = self.poll_policy.max_attempts;

        let outcome = poll_until(self.poll_policy, cancel, |attempt| async move {
            let signal_response = api.get_signal_response(token).await?;
            view.update_status(&format!(
                "Initialization attempt ({attempt}/{max_attempts})..."
            ));
            Ok::<_, ApiError>((!signal_response.is_empty()).then_some(signal_response))
        })
        .await;

        outcome.map_err(|err| match err {
            PollError::Exhausted { attempts } => ClientError::Timeout { attempts },
            PollError::Cancelled => ClientError::Cancelled,
            PollError::Failed(api_err) => ClientError::Api(api_err),
        })
    }

    /// Reconnect to the session behind the held token with a single request.
    pub async fn reconnect(&mut self) -> Result<(), ClientError> {
        self.transition(ConnectionState::Connecting);
        self.view.show_panel(Panel::Connecting);
        self.view.update_status("Reconnecting to your game...");

        let result = match self.token.clone() {
            Some(token) => self.reconnect_with(&token).await,
            None => Err(ClientError::MissingToken),
        };

        match result {
            Ok(()) => {
                self.enter_streaming();
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "reconnection error");
                self.close_sdk();
                self.view.show_error(&format!("Failed to reconnect: {err}"));
                // A failed reconnect means the session is gone for good.
                self.purge_token();
                self.transition(ConnectionState::Error);
                Err(err)
            }
        }
    }

    async fn reconnect_with(&self, token: &str) -> Result<(), ClientError> {
        let signal_request = self.sdk.generate_signal_request().await?;
        let signal_response = self
            .api
            .reconnect_stream_session(token, &signal_request)
            .await?;
        self.sdk.process_signal_response(&signal_response).await?;
        Ok(())
    }

    /// Route an SDK callback into the state machine.
    pub fn handle_event(&mut self, event: SdkEvent) {
        match event {
            SdkEvent::ConnectionState(state) => {
                tracing::info!(%state, "connection state changed");
                if state == SdkEvent::DISCONNECTED {
                    self.disconnect();
                }
            }
            SdkEvent::ChannelError(error) => {
                tracing::error!(%error, "transport channel error");
                self.disconnect();
            }
            SdkEvent::ServerDisconnect(reason) => {
                tracing::info!(%reason, "server disconnected");
                if reason == SdkEvent::TERMINATED {
                    // The session has ended; there is nothing to reconnect to.
                    self.purge_token();
                }
                self.disconnect();
            }
            SdkEvent::ApplicationMessage(message) => {
                tracing::debug!(bytes = message.len(), "received message from application");
            }
        }
    }

    /// Drop the live connection but keep the token for a later reconnect.
    pub fn disconnect(&mut self) {
        self.canceller.cancel();
        self.close_sdk();
        self.metrics.stop();
        self.view.show_panel(Panel::Disconnected);
        self.transition(ConnectionState::Disconnected);
    }

    /// End the remote session. Server errors are logged and otherwise ignored.
    pub async fn terminate(&mut self) {
        if let Some(token) = self.token.clone() {
            if let Err(err) = self.api.destroy_stream_session(&token).await {
                tracing::error!(error = %err, "error terminating stream");
            }
        }

        self.purge_token();
        self.disconnect();
    }

    /// Forget everything and start a brand new session.
    pub async fn restart(&mut self) -> Result<(), ClientError> {
        self.canceller.cancel();
        self.purge_token();
        self.metrics.stop();
        self.close_sdk();
        self.transition(ConnectionState::Idle);

        self.start_streaming().await
    }

    pub fn toggle_input(&mut self) -> bool {
        self.input_enabled = !self.input_enabled;
        if self.input_enabled {
            self.sdk.attach_input();
        } else {
            self.sdk.detach_input();
        }
        self.input_enabled
    }

    fn enter_streaming(&mut self) {
        self.view.show_panel(Panel::Streaming);
        self.transition(ConnectionState::Streaming);
        if !self.input_enabled {
            self.toggle_input();
        }
        self.metrics.start();
    }

    fn purge_token(&mut self) {
        self.location.clear_token();
        self.token = None;
        self.view.set_reconnect_available(false);
    }

    // Input is bound to the connection; a closed SDK has none attached.
    fn close_sdk(&mut self) {
        self.sdk.close();
        self.input_enabled = false;
    }

    fn transition(&mut self, next: ConnectionState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "session state transition");
        }
        self.state = next;
    }
}
