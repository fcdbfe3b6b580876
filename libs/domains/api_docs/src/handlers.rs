use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::Catalog;
use crate::pages::{docs_context, landing_context};
use crate::render::render;
use crate::store::SpecStore;
use crate::templates::Templates;

pub const YAML_CONTENT_TYPE: &str = "application/x-yaml";

/// Shared, read-only state for every route.
#[derive(Clone)]
pub struct DocsState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn SpecStore>,
    pub templates: Arc<Templates>,
}

impl DocsState {
    pub fn new(catalog: Catalog, store: Arc<dyn SpecStore>, templates: Templates) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
            templates: Arc::new(templates),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub apis: Vec<String>,
    pub count: usize,
}

/// Create the documentation router.
///
/// `/api-docs/{key}` and `/api/{key}/openapi.yaml` are bound once per catalog
/// key, so a key the catalog does not know has no route at all and falls
/// through to the 404 fallback.
pub fn router(state: DocsState) -> Router {
    let mut router = Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health));

    for key in state.catalog.keys() {
        let docs_key = key.to_string();
        router = router.route(
            &format!("/api-docs/{}", key),
            get(move |State(state): State<DocsState>| async move {
                api_docs_page(state, &docs_key)
            }),
        );

        let raw_key = key.to_string();
        router = router.route(
            &format!("/api/{}/openapi.yaml", key),
            get(move |State(state): State<DocsState>| async move {
                raw_document(state, &raw_key).await
            }),
        );
    }

    router.with_state(state)
}

async fn landing_page(State(state): State<DocsState>) -> Html<String> {
    let context = landing_context(&state.catalog);
    Html(render(&state.templates.landing, &context))
}

fn api_docs_page(state: DocsState, key: &str) -> Result<Html<String>, AppError> {
    let entry = state
        .catalog
        .get(key)
        .ok_or_else(|| AppError::NotFound(format!("API {}", key)))?;

    let context = docs_context(&state.catalog, entry)?;
    Ok(Html(render(&state.templates.api_docs, &context)))
}

async fn raw_document(state: DocsState, key: &str) -> Result<Response, AppError> {
    let entry = state
        .catalog
        .get(key)
        .ok_or_else(|| AppError::NotFound(format!("API {}", key)))?;

    let bytes = state.store.fetch(&entry.location).await.map_err(|e| {
        AppError::SpecUnavailable(format!("serving {} from {}: {}", key, state.store.name(), e))
    })?;

    Ok(([(header::CONTENT_TYPE, YAML_CONTENT_TYPE)], bytes).into_response())
}

async fn health(State(state): State<DocsState>) -> Json<HealthResponse> {
    let apis: Vec<String> = state.catalog.keys().map(str::to_string).collect();

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        count: apis.len(),
        apis,
    })
}
