use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::trace;

use crate::api::response::{endpoint_not_found, json_response, preflight};
use crate::services::CodeRegistry;

pub struct IndexService;

impl IndexService {
    /// `GET /`
    pub async fn describe(registry: web::Data<Arc<CodeRegistry>>) -> HttpResponse {
        json_response(StatusCode::OK, &registry.describe())
    }

    /// `OPTIONS` on any path.
    pub async fn preflight() -> HttpResponse {
        preflight()
    }

    /// Anything no route claimed.
    pub async fn fallback(req: HttpRequest) -> HttpResponse {
        if req.method() == Method::OPTIONS {
            return preflight();
        }
        trace!("No endpoint for {} {}", req.method(), req.path());
        endpoint_not_found()
    }
}
