//! # Axum Helpers
//!
//! Shared plumbing for the documentation server's HTTP surface.
//!
//! ## Modules
//!
//! - **[`server`]**: router assembly (static assets, fallbacks, middleware), server start, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: structured `{error, message}` error responses
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let router = create_router(Router::new(), &config)?;
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};
pub use server::{create_app, create_router, shutdown_signal};
