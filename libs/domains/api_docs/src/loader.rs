//! Catalog construction
//!
//! Fail-soft: a document that cannot be fetched, parsed or keyed is logged
//! and skipped. Only a store that cannot be listed at all fails the load.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{SpecError, SpecResult};
use crate::models::{is_valid_key, Catalog, DocumentRef, SpecEntry};
use crate::store::SpecStore;

/// Enumerate `store` and build the catalog from every loadable document.
pub async fn load_catalog(store: &dyn SpecStore) -> SpecResult<Catalog> {
    let documents = store.list_documents().await.inspect_err(|e| {
        error!(store = store.name(), error = %e, "Failed to list specification documents");
    })?;

    info!(
        store = store.name(),
        count = documents.len(),
        "Discovered specification documents"
    );

    let mut catalog = Catalog::new();

    for document_ref in documents {
        let location = document_ref.location.clone();
        let loaded = load_entry(store, document_ref)
            .await
            .and_then(|entry| {
                let summary = (entry.key.clone(), entry.title.clone(), entry.version.clone());
                catalog.insert(entry).map(|()| summary)
            });

        match loaded {
            Ok((key, title, version)) => {
                info!("Loaded API: {} ({} v{})", key, title, version);
            }
            Err(e) => {
                warn!(location = %location, error = %e, "Skipping specification document");
            }
        }
    }

    if catalog.is_empty() {
        warn!(store = store.name(), "No specification documents were loaded");
    }

    Ok(catalog)
}

async fn load_entry(store: &dyn SpecStore, document_ref: DocumentRef) -> SpecResult<SpecEntry> {
    let key = document_ref.key();
    if !is_valid_key(&key) {
        return Err(SpecError::InvalidKey(key));
    }

    let bytes = store.fetch(&document_ref.location).await?;
    let document = parse_document(&document_ref.location, &bytes)?;

    Ok(SpecEntry::new(document_ref, document))
}

/// Parse YAML bytes into a JSON value tree.
///
/// Merge keys (`<<: *anchor`) are expanded. The document root must be a
/// mapping; scalars, sequences and empty documents are rejected.
pub fn parse_document(location: &str, bytes: &[u8]) -> SpecResult<Value> {
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_slice(bytes).map_err(|e| SpecError::parse(location, e))?;

    if !yaml.is_mapping() {
        return Err(SpecError::parse(location, "document root is not a mapping"));
    }

    yaml.apply_merge().map_err(|e| SpecError::parse(location, e))?;

    serde_json::to_value(&yaml).map_err(|e| SpecError::parse(location, e))
}
