use crate::domain::errors::SessionError;
use crate::interface_adapters::protocol::{
    CreateStreamSessionRequest, CreateStreamSessionResponse, DestroyStreamSessionRequest,
    DestroyStreamSessionResponse, ErrorResponse, GetSignalResponseRequest,
    ReconnectStreamSessionRequest, SignalResponsePayload,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::create_session::CreateSessionUseCase;
use crate::use_cases::destroy_session::DestroySessionUseCase;
use crate::use_cases::get_signal_response::GetSignalResponseUseCase;
use crate::use_cases::reconnect_session::ReconnectSessionUseCase;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

// Plain-text liveness probe on the root path.
pub async fn health_check() -> &'static str {
    "Health check: Server is running"
}

// Handler for starting a stream session and issuing a connection token.
#[tracing::instrument(name = "create_stream_session", skip_all)]
pub async fn create_stream_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateStreamSessionRequest>, JsonRejection>,
) -> ApiResult<CreateStreamSessionResponse> {
    let Json(payload) =
        payload.map_err(|rejection| map_json_rejection(rejection, SessionErrorContext::Create))?;

    tracing::info!(
        user_id = ?payload.user_id,
        has_signal_request = payload.signal_request.is_some(),
        "create stream session request received"
    );

    let use_case = CreateSessionUseCase {
        clock: SystemClock,
        store: state.store.clone(),
        api: state.streaming.clone(),
        settings: state.settings.clone(),
    };

    let result = use_case
        .execute(payload)
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::Create))?;

    tracing::info!(arn = %result.stream_session_arn, "stream session started");

    Ok(Json(CreateStreamSessionResponse {
        token: result.token,
    }))
}

// Handler for polling the signal answer of a starting session.
#[tracing::instrument(name = "get_signal_response", skip_all)]
pub async fn get_signal_response(
    State(state): State<AppState>,
    payload: Result<Json<GetSignalResponseRequest>, JsonRejection>,
) -> ApiResult<SignalResponsePayload> {
    let Json(payload) =
        payload.map_err(|rejection| map_json_rejection(rejection, SessionErrorContext::GetSignal))?;

    let use_case = GetSignalResponseUseCase {
        clock: SystemClock,
        store: state.store.clone(),
        api: state.streaming.clone(),
        connection_timeout_ms: state.settings.connection_timeout_ms(),
    };

    let signal = use_case
        .execute(payload.token)
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::GetSignal))?;

    Ok(Json(SignalResponsePayload {
        signal_response: signal.into_signal_response(),
    }))
}

// Handler for opening a new connection to an existing session.
#[tracing::instrument(name = "reconnect_stream_session", skip_all)]
pub async fn reconnect_stream_session(
    State(state): State<AppState>,
    payload: Result<Json<ReconnectStreamSessionRequest>, JsonRejection>,
) -> ApiResult<SignalResponsePayload> {
    let Json(payload) =
        payload.map_err(|rejection| map_json_rejection(rejection, SessionErrorContext::Reconnect))?;

    let use_case = ReconnectSessionUseCase {
        store: state.store.clone(),
        api: state.streaming.clone(),
    };

    let answer = use_case
        .execute(payload)
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::Reconnect))?;

    tracing::info!("stream session reconnected");

    Ok(Json(SignalResponsePayload {
        signal_response: answer,
    }))
}

// Handler for terminating a session and revoking its token.
#[tracing::instrument(name = "destroy_stream_session", skip_all)]
pub async fn destroy_stream_session(
    State(state): State<AppState>,
    payload: Result<Json<DestroyStreamSessionRequest>, JsonRejection>,
) -> ApiResult<DestroyStreamSessionResponse> {
    let Json(payload) =
        payload.map_err(|rejection| map_json_rejection(rejection, SessionErrorContext::Destroy))?;

    let use_case = DestroySessionUseCase {
        store: state.store.clone(),
        api: state.streaming.clone(),
    };

    use_case
        .execute(payload.token)
        .await
        .map_err(|err| map_session_error(err, SessionErrorContext::Destroy))?;

    tracing::info!("stream session terminated");

    Ok(Json(DestroyStreamSessionResponse { success: true }))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// Bodies that are not JSON, or whose fields have the wrong type, get the same
// 400 envelope as a missing parameter. Extractor details only go to the log.
fn map_json_rejection(
    rejection: JsonRejection,
    context: SessionErrorContext,
) -> (StatusCode, Json<ErrorResponse>) {
    tracing::warn!(
        ?context,
        status = rejection.status().as_u16(),
        reason = %rejection.body_text(),
        "malformed request body"
    );
    error_response(StatusCode::BAD_REQUEST, "Invalid request body")
}

// Endpoint context used only to label logged failures.
#[derive(Clone, Copy, Debug)]
enum SessionErrorContext {
    Create,
    GetSignal,
    Reconnect,
    Destroy,
}

// Upstream details go to the log; callers only ever see the generic message.
fn map_session_error(
    err: SessionError,
    context: SessionErrorContext,
) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        SessionError::MissingParameter(name) => {
            tracing::warn!(?context, parameter = name, "request rejected");
            error_response(
                StatusCode::BAD_REQUEST,
                &format!("Missing required parameter: {name}"),
            )
        }
        SessionError::NotFound => {
            tracing::info!(?context, "unknown or expired token");
            error_response(StatusCode::NOT_FOUND, "Token not found")
        }
        SessionError::SessionUnavailable(status) => {
            tracing::warn!(?context, %status, "stream session not available");
            error_response(StatusCode::BAD_GATEWAY, "Stream session not available")
        }
        SessionError::UpstreamFailure(source) => {
            tracing::error!(?context, error = %source, "streaming api call failed");
            error_response(StatusCode::BAD_GATEWAY, "Upstream service error")
        }
    }
}
