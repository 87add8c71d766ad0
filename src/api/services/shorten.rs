use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, trace, warn};

use crate::api::ApiSettings;
use crate::api::response::{error_json, from_error, internal_error, json_response};
use crate::services::{CodeRegistry, MSG_URL_REQUIRED};
use crate::utils::MAX_BODY_LEN;

pub const MSG_BODY_TOO_LARGE: &str = "Request body too large";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
}

pub struct ShortenService;

impl ShortenService {
    /// `POST /shorten` with body `{"url": "..."}`.
    pub async fn shorten(
        req: HttpRequest,
        payload: web::Payload,
        registry: web::Data<Arc<CodeRegistry>>,
        settings: web::Data<ApiSettings>,
    ) -> HttpResponse {
        let body = match read_body(payload).await {
            Ok(body) => body,
            Err(resp) => return resp,
        };

        // 空 body 视为 {}
        let request: Value = if body.is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_slice(&body) {
                Ok(v) => v,
                Err(e) => {
                    error!("Failed to parse shorten request body: {}", e);
                    return internal_error();
                }
            }
        };

        let long_url = match request.get("url").and_then(Value::as_str) {
            Some(url) if !url.is_empty() => url,
            _ => return error_json(StatusCode::BAD_REQUEST, MSG_URL_REQUIRED),
        };
        trace!("Shorten request for {} chars", long_url.chars().count());

        match registry.create(long_url).await {
            Ok(short_code) => {
                let host = req.connection_info().host().to_string();
                let short_url = build_short_url(&host, &settings.stage, &short_code);
                json_response(
                    StatusCode::CREATED,
                    &ShortenResponse {
                        short_code,
                        short_url,
                        long_url: long_url.to_string(),
                    },
                )
            }
            Err(e) => from_error(&e),
        }
    }
}

/// Collect the request body, capped at [`MAX_BODY_LEN`] bytes.
///
/// Oversized and broken bodies are answered here with the JSON envelope.
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, HttpResponse> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                error!("Failed to read shorten request body: {}", e);
                return Err(internal_error());
            }
        };
        if body.len() + chunk.len() > MAX_BODY_LEN {
            warn!("Shorten request body exceeds {} bytes", MAX_BODY_LEN);
            return Err(error_json(StatusCode::PAYLOAD_TOO_LARGE, MSG_BODY_TOO_LARGE));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// `https://{host}/{stage}/{code}`, or `https://{host}/{code}` without a stage.
pub fn build_short_url(host: &str, stage: &str, code: &str) -> String {
    let stage = stage.trim_matches('/');
    if stage.is_empty() {
        format!("https://{}/{}", host, code)
    } else {
        format!("https://{}/{}/{}", host, stage, code)
    }
}
