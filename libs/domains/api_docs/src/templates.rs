use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::{SpecError, SpecResult};

pub const LANDING_TEMPLATE: &str = "landing.html";
pub const API_DOCS_TEMPLATE: &str = "api-docs.html";

/// The two page templates, read once at startup.
#[derive(Debug, Clone)]
pub struct Templates {
    pub landing: String,
    pub api_docs: String,
}

impl Templates {
    pub fn new(landing: impl Into<String>, api_docs: impl Into<String>) -> Self {
        Self {
            landing: landing.into(),
            api_docs: api_docs.into(),
        }
    }

    /// Read `templates/landing.html` and `templates/api-docs.html` under `public_dir`.
    pub async fn load(public_dir: &Path) -> SpecResult<Self> {
        let dir = public_dir.join("templates");
        let landing = read_template(&dir.join(LANDING_TEMPLATE)).await?;
        let api_docs = read_template(&dir.join(API_DOCS_TEMPLATE)).await?;

        info!(dir = %dir.display(), "Loaded page templates");
        Ok(Self::new(landing, api_docs))
    }
}

async fn read_template(path: &Path) -> SpecResult<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| SpecError::Template {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
}
