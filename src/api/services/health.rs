use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::api::response::json_response;
use crate::services::CodeRegistry;

/// Store round-trips slower than this count as unhealthy.
const STORE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub timestamp: String,
    pub uptime: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_time_ms: u64,
}

/// Health Service
///
/// Pings the store directly; the registry's operations all have side effects.
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        registry: web::Data<Arc<CodeRegistry>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> HttpResponse {
        let start_time = Instant::now();
        trace!("Received health check request");

        let store = registry.store();
        let error = match tokio::time::timeout(STORE_CHECK_TIMEOUT, store.ping()).await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => {
                error!("Store health check failed: {}", e);
                Some("store error".to_string())
            }
            Err(_) => {
                error!("Store health check timeout");
                Some("timeout".to_string())
            }
        };

        let now = chrono::Utc::now();
        let is_healthy = error.is_none();
        let body = HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" },
            backend: store.backend_name(),
            timestamp: now.to_rfc3339(),
            uptime: (now - app_start_time.start_datetime).num_seconds().max(0) as u64,
            error,
            response_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        json_response(status, &body)
    }
}
