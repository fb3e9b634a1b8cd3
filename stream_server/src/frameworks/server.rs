// Framework bootstrap for the stream session server.

use crate::frameworks::config;
use crate::interface_adapters::clients::gamelift::GameLiftStreamsClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::io::Result;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serve an already-built router on the given listener.
pub async fn run(listener: tokio::net::TcpListener, app: Router) -> Result<()> {
    let address = listener.local_addr()?;
    tracing::info!(%address, "listening on http");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let state = build_state().await?;
    let app = routes::app_with_client(state, &config::client_dir());

    let (cert, key) = config::tls_files();
    match load_tls(&cert, &key).await {
        Some(tls) => {
            let https_address = SocketAddr::from(([0, 0, 0, 0], config::https_port()));
            tokio::spawn(serve_https(https_address, tls, app.clone()));
        }
        None => {
            tracing::warn!(
                cert = %cert.display(),
                key = %key.display(),
                "unable to load TLS certificate and private key, HTTPS disabled"
            );
        }
    }

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, app).await
}

async fn build_state() -> Result<AppState> {
    let settings = config::stream_settings()
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))?;

    let streaming = GameLiftStreamsClient::from_env(config::aws_region())
        .await
        .map_err(|e| {
            std::io::Error::other(format!("failed to initialize GameLift Streams client: {e}"))
        })?;

    tracing::debug!(
        stream_group_id = %settings.stream_group_id,
        application_identifier = ?settings.application_identifier,
        locations = ?settings.locations,
        connection_timeout_seconds = settings.connection_timeout_seconds,
        "stream settings loaded"
    );

    Ok(AppState::new(Arc::new(streaming), settings))
}

async fn load_tls(cert: &Path, key: &Path) -> Option<RustlsConfig> {
    if !cert.exists() || !key.exists() {
        return None;
    }
    RustlsConfig::from_pem_file(cert, key)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "failed to parse TLS files"))
        .ok()
}

async fn serve_https(address: SocketAddr, tls: RustlsConfig, app: Router) {
    tracing::info!(%address, "listening on https");
    if let Err(e) = axum_server::bind_rustls(address, tls)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!(%address, error = %e, "https server error");
    }
}
