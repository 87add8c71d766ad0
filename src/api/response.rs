//! JSON envelopes and CORS headers shared by every handler.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::errors::ShortenerError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "Endpoint not found";

const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
const ALLOW_HEADERS: (&str, &str) = ("Access-Control-Allow-Headers", "Content-Type");
const ALLOW_METHODS: (&str, &str) = ("Access-Control-Allow-Methods", "GET,POST,OPTIONS");

/// Builder preloaded with the CORS header set.
fn cors_builder(status: StatusCode) -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder
        .insert_header(ALLOW_ORIGIN)
        .insert_header(ALLOW_HEADERS)
        .insert_header(ALLOW_METHODS);
    builder
}

/// `application/json` body with CORS headers.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    cors_builder(status).json(body)
}

pub fn error_json(status: StatusCode, message: &str) -> HttpResponse {
    json_response(status, &json!({ "error": message }))
}

pub fn internal_error() -> HttpResponse {
    error_json(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

pub fn endpoint_not_found() -> HttpResponse {
    error_json(StatusCode::NOT_FOUND, ENDPOINT_NOT_FOUND_MESSAGE)
}

/// Map a registry error onto the wire.
///
/// Client errors carry their message. Everything else is logged here and
/// answered with the generic 500 body.
pub fn from_error(err: &ShortenerError) -> HttpResponse {
    match StatusCode::from_u16(err.http_status()) {
        Ok(status) if status.is_client_error() => error_json(status, err.message()),
        _ => {
            error!("{}", err.format_simple());
            internal_error()
        }
    }
}

/// Empty-bodied CORS preflight answer.
pub fn preflight() -> HttpResponse {
    cors_builder(StatusCode::OK)
        .insert_header(("Content-Type", "application/json"))
        .finish()
}

/// 301 to `location`. Only the origin header is attached, body is empty.
pub fn permanent_redirect(location: &str) -> HttpResponse {
    HttpResponse::build(StatusCode::MOVED_PERMANENTLY)
        .insert_header(("Location", location))
        .insert_header(ALLOW_ORIGIN)
        .finish()
}
