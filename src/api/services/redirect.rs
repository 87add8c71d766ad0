use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::trace;

use crate::api::response::{from_error, permanent_redirect};
use crate::services::CodeRegistry;

pub struct RedirectService;

impl RedirectService {
    /// `GET /{code}` and `GET /{code}/...`: only the first segment counts.
    pub async fn handle_redirect(
        req: HttpRequest,
        registry: web::Data<Arc<CodeRegistry>>,
    ) -> HttpResponse {
        let code = first_path_segment(req.match_info().get("path").unwrap_or_default());

        match registry.resolve(code).await {
            Ok(long_url) => {
                trace!("Redirecting {} -> {}", code, long_url);
                permanent_redirect(&long_url)
            }
            Err(e) => {
                trace!("Redirect for '{}' failed: {}", code, e);
                from_error(&e)
            }
        }
    }
}

/// First segment after any run of leading slashes; `//abc123/x` gives `abc123`.
fn first_path_segment(path: &str) -> &str {
    path.trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::first_path_segment;

    #[test]
    fn test_first_path_segment() {
        assert_eq!(first_path_segment("abc123"), "abc123");
        assert_eq!(first_path_segment("abc123/more/parts"), "abc123");
        assert_eq!(first_path_segment("/abc123"), "abc123");
        assert_eq!(first_path_segment("///abc123/"), "abc123");
        assert_eq!(first_path_segment("/"), "");
        assert_eq!(first_path_segment(""), "");
    }
}
