use tokio::signal;
use tracing::{info, warn};

/// Resolve once Ctrl+C arrives.
///
/// Every request finishes its store call synchronously, so there is
/// nothing to flush afterwards.
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}
