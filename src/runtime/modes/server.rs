//! Server mode
//!
//! Builds the startup context, then runs the HTTP server until it stops
//! or a shutdown signal arrives.

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{self, middleware::TimingMiddleware, services::AppStartTime};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {:#}", e);
            e
        })?;

    let registry = startup.registry.clone();
    let api_settings = startup.api_settings.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} worker threads", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware)
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(api_settings.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(api::configure)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res.context("HTTP server exited with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: server stopped");
        }
    }

    Ok(())
}
