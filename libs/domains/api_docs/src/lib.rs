//! API Docs Domain
//!
//! Discovers OpenAPI documents in a [`SpecStore`](store::SpecStore), builds an
//! immutable [`Catalog`] once at startup, and serves a landing page, one
//! documentation page per API and the raw YAML of each document.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← Routes bound per catalog key
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Pages     │  ← Render contexts + template renderer
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Loader    │  ← Catalog construction (fail-soft per document)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Store     │  ← Local directory, S3, in-memory
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use domain_api_docs::{handlers, load_catalog, DocsState, LocalSpecStore, Templates};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(LocalSpecStore::new("data"));
//! let catalog = load_catalog(store.as_ref()).await?;
//! let templates = Templates::load(Path::new("public")).await?;
//!
//! let router = handlers::router(DocsState::new(catalog, store, templates));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod pages;
pub mod render;
pub mod store;
pub mod templates;

pub use error::{SpecError, SpecResult};
pub use handlers::{DocsState, HealthResponse};
pub use loader::{load_catalog, parse_document};
pub use models::{Catalog, DocumentRef, SpecEntry, SpecMetadata};
pub use store::{InMemorySpecStore, LocalSpecStore, S3SpecStore, SpecStore};
pub use templates::Templates;
