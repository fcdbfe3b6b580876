use crate::errors::handlers::{handle_panic, not_found};
use crate::http::cors::{create_cors_layer, create_permissive_cors_layer, parse_origins};
use crate::http::security::security_headers;
use super::shutdown::shutdown_signal;
use axum::handler::HandlerWithoutStateExt;
use axum::{middleware, Router};
use core_config::env_optional;
use core_config::server::ServerConfig;
use std::io;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if:
/// - The TCP listener fails to bind to the configured address
/// - The server encounters an error during operation
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Wraps application routes with static assets, fallbacks and common middleware.
///
/// This function sets up:
/// - `routes` first, then files under `server_config.public_dir` for any path
///   the routes do not match
/// - JSON 404 for anything neither matches
/// - Panic capture rendered as a generic JSON 500
/// - Request tracing, security headers, CORS and response compression
///
/// CORS is permissive unless `CORS_ALLOWED_ORIGIN` holds a comma-separated
/// origin list.
///
/// # Errors
/// Returns an error if `CORS_ALLOWED_ORIGIN` is set but contains an invalid origin.
pub fn create_router(routes: Router, server_config: &ServerConfig) -> io::Result<Router> {
    let cors_layer = cors_from_env()?;

    let static_files = ServeDir::new(&server_config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());

    let router = Router::new()
        .merge(routes)
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

fn cors_from_env() -> io::Result<CorsLayer> {
    match env_optional("CORS_ALLOWED_ORIGIN") {
        Some(raw) => {
            let origins = parse_origins(&raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            if origins.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "CORS_ALLOWED_ORIGIN contains no origins",
                ));
            }
            info!("CORS configured with allowed origins: {}", raw);
            Ok(create_cors_layer(origins))
        }
        None => Ok(create_permissive_cors_layer()),
    }
}
