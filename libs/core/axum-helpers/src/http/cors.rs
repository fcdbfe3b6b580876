use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Creates a CORS layer restricted to the given origins.
///
/// The portal is read-only, so only GET, HEAD and OPTIONS are allowed.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

/// Creates a CORS layer that accepts any origin.
///
/// Documentation and raw specifications are public, so viewers hosted
/// elsewhere may fetch `/api/{key}/openapi.yaml` directly.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

/// Parses a comma-separated origin list (e.g. `CORS_ALLOWED_ORIGIN`).
///
/// Blank entries are ignored; an invalid header value is an error.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| format!("invalid origin '{}': {}", s, e))
        })
        .collect()
}
