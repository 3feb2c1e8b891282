//! Server initialization and routing
//!
//! Builds the Axum router around the identification handler and runs it
//! with graceful shutdown.

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use crate::config::Config;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router.
///
/// The upload limit applies to `/api/identify` only. CORS is permissive so
/// browser front-ends on other origins can post camera captures. The
/// request timeout is enforced inside the handler so that it keeps the
/// JSON error envelope.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let state = state.with_request_timeout(config.request_timeout());
    let api = Router::new()
        .route("/api/identify", post(routes::identify))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()));

    Router::new()
        .route("/health", get(routes::health))
        .merge(api)
        .fallback(routes::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and block until shutdown.
pub async fn serve(config: &Config, state: AppState) -> crate::Result<()> {
    let addr = config.socket_addr()?;
    let app = build_router(state, config);

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "Max upload: {}MB, request timeout: {}s",
        config.max_upload_mb,
        config.request_timeout_secs
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
