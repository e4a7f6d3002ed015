use crate::config::ServerConfig;
use crate::error::ServerError;
use axum::Router;
use tokio::signal;
use tracing::info;

/// Bind and serve until SIGINT/SIGTERM. Call only once the inference context is loaded:
/// binding the listener is what makes the service ready.
pub async fn serve(app: Router, server: &ServerConfig) -> Result<(), ServerError> {
    let bind_addr = format!("{}:{}", server.bind_addr, server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServerError::Bind {
            address: bind_addr.clone(),
            source: e,
        })?;
    info!("listening on {}", listener.local_addr()?);
    info!("  - GET  /             (banner)");
    info!("  - GET  /health       (health check)");
    info!("  - POST /api/predict  (classify a URL)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
