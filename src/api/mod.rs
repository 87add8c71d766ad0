//! HTTP surface
//!
//! Thin dispatch onto the code registry. Handlers never touch the store
//! except for the health ping.

pub mod middleware;
pub mod response;
pub mod services;

use actix_web::http::Method;
use actix_web::web;

use self::services::{HealthService, IndexService, RedirectService, ShortenService};

/// Per-request settings the handlers need from static config.
#[derive(Clone, Debug, Default)]
pub struct ApiSettings {
    /// Path segment inserted into `shortUrl` between host and code.
    pub stage: String,
}

/// Route table.
///
/// Each route carries its method guard on the resource, so a method that
/// does not match falls through to the next pattern and finally to the
/// 404 fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(IndexService::describe))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/shorten", web::post().to(ShortenService::shorten))
        .route("/{path:.*}", web::get().to(RedirectService::handle_redirect))
        .route(
            "/{tail:.*}",
            web::method(Method::OPTIONS).to(IndexService::preflight),
        )
        .default_service(web::to(IndexService::fallback));
}
