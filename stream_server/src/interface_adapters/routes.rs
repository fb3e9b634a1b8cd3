use crate::interface_adapters::handlers::{
    create_stream_session, destroy_stream_session, get_signal_response, health_check,
    reconnect_stream_session,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

// Session API plus health check. All API endpoints are POST with JSON bodies.
pub fn app(state: AppState) -> Router {
    routes(state).layer(TraceLayer::new_for_http())
}

// Same routes, with the web client served for every other path.
pub fn app_with_client(state: AppState, client_dir: &Path) -> Router {
    routes(state)
        .fallback_service(ServeDir::new(client_dir))
        .layer(TraceLayer::new_for_http())
}

fn routes(state: AppState) -> Router {
    let api = Router::new()
        .route("/CreateStreamSession", post(create_stream_session))
        .route("/GetSignalResponse", post(get_signal_response))
        .route("/ReconnectStreamSession", post(reconnect_stream_session))
        .route("/DestroyStreamSession", post(destroy_stream_session));

    Router::new()
        .route("/", get(health_check))
        .nest("/api", api)
        .with_state(state)
}
