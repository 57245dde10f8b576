use tokio::signal;
use tracing::{error, warn};

/// Resolves on the first Ctrl-C or SIGTERM.
///
/// Used as the graceful shutdown trigger for the API server and the stub
/// lookup service. If a handler cannot be installed, that source is ignored
/// and the other one still stops the process.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
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
                error!("Failed to create SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Received Ctrl-C, shutting down"),
        _ = terminate => warn!("Received SIGTERM signal, shutting down"),
    }
}
