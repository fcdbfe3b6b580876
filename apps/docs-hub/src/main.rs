use core_config::store::{StoreBackend, StoreConfig};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_api_docs::{
    handlers, load_catalog, DocsState, LocalSpecStore, S3SpecStore, SpecStore, Templates,
};
use eyre::WrapErr;
use std::sync::Arc;
use tracing::info;

mod config;

use config::Config;

async fn build_store(store: &StoreConfig) -> eyre::Result<Arc<dyn SpecStore>> {
    match store.backend {
        StoreBackend::Local => {
            info!("Loading specifications from {}", store.specs_dir.display());
            Ok(Arc::new(LocalSpecStore::new(store.specs_dir.clone())))
        }
        StoreBackend::S3 => {
            let s3 = store
                .s3
                .as_ref()
                .ok_or_else(|| eyre::eyre!("S3 backend selected without S3 configuration"))?;
            info!("Loading specifications from s3://{}/{}", s3.bucket, s3.prefix);
            Ok(Arc::new(S3SpecStore::from_config(s3).await))
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Starting {} v{}", config.app.name, config.app.version);

    let store = build_store(&config.store).await?;

    // The catalog is built once; documents added later need a restart
    let catalog = load_catalog(store.as_ref())
        .await
        .wrap_err("Failed to load API specifications")?;

    let templates = Templates::load(&config.server.public_dir)
        .await
        .wrap_err("Failed to load page templates")?;

    let base_url = config.server.display_url();
    let docs_urls: Vec<String> = catalog
        .keys()
        .map(|key| format!("{}/api-docs/{}", base_url, key))
        .collect();

    let routes = handlers::router(DocsState::new(catalog, store, templates));
    let router = axum_helpers::create_router(routes, &config.server)?;

    info!("Loaded {} API specification(s)", docs_urls.len());
    for url in &docs_urls {
        info!("  {}", url);
    }
    info!("Health check: {}/health", base_url);

    axum_helpers::create_app(router, &config.server).await?;

    info!("Docs hub shutdown complete");
    Ok(())
}
