//! Graceful shutdown handling

/// Wait for SIGINT or SIGTERM
///
/// Used as the axum graceful shutdown future: in-flight requests are
/// allowed to complete before the listener closes.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::debug!("Received SIGTERM, shutting down"),
    }
}
