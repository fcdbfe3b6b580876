//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with static assets, fallbacks and common middleware
//! - Server start with graceful shutdown
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let router = create_router(routes, &config)?;
//! create_app(router, &config).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use shutdown::shutdown_signal;
