// Shared primitives for one-time server bootstrapping across integration tests.
use async_trait::async_trait;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use stream_server::domain::errors::StreamingApiError;
use stream_server::domain::ports::StreamingApi;
use stream_server::domain::streaming::{
    ReconnectSessionRequest, RemoteSession, RemoteStatus, StartSessionRequest, StartedSession,
};
use stream_server::interface_adapters::routes;
use stream_server::interface_adapters::state::AppState;
use stream_server::use_cases::StreamSettings;

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Streaming backend that activates each session on its second poll.
#[derive(Default)]
pub struct ScriptedStreamingApi {
    polls: Mutex<u32>,
}

#[async_trait]
impl StreamingApi for ScriptedStreamingApi {
    async fn start_session(
        &self,
        req: StartSessionRequest,
    ) -> Result<StartedSession, StreamingApiError> {
        Ok(StartedSession {
            arn: format!("arn:test:{}", req.signal_request),
        })
    }

    async fn get_session(
        &self,
        _stream_group_id: &str,
        stream_session_arn: &str,
    ) -> Result<RemoteSession, StreamingApiError> {
        let mut polls = self.polls.lock().expect("polls mutex poisoned");
        *polls += 1;
        if *polls % 2 == 1 {
            return Ok(RemoteSession {
                status: RemoteStatus::Activating,
                signal_response: None,
            });
        }
        Ok(RemoteSession {
            status: RemoteStatus::Active,
            signal_response: Some(format!("answer-for-{stream_session_arn}")),
        })
    }

    async fn create_session_connection(
        &self,
        req: ReconnectSessionRequest,
    ) -> Result<String, StreamingApiError> {
        Ok(format!("reconnect-answer-{}", req.signal_request))
    }

    async fn terminate_session(
        &self,
        _stream_group_id: &str,
        _stream_session_arn: &str,
    ) -> Result<(), StreamingApiError> {
        Ok(())
    }
}

fn test_settings() -> StreamSettings {
    StreamSettings {
        stream_group_id: "sg-integration".to_string(),
        default_user_id: "DefaultUser".to_string(),
        connection_timeout_seconds: 600,
        session_length_seconds: 3600,
        application_identifier: None,
        locations: None,
    }
}

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));

                let state =
                    AppState::new(Arc::new(ScriptedStreamingApi::default()), test_settings());
                stream_server::run(listener, routes::app(state))
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
