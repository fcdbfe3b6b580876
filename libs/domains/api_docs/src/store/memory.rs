//! In-memory store (for development/testing)

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::warn;

use super::SpecStore;
use crate::error::{SpecError, SpecResult};
use crate::models::DocumentRef;

/// Documents held in memory, keyed by location (`folder/file` or `file`).
///
/// Clones share the same documents and failure switches, so a test can keep
/// a handle after passing the store to the router.
#[derive(Debug, Default, Clone)]
pub struct InMemorySpecStore {
    documents: Arc<RwLock<BTreeMap<String, (DocumentRef, Vec<u8>)>>>,
    fail_list: Arc<AtomicBool>,
    fail_fetch: Arc<AtomicBool>,
}

fn location_of(folder: Option<&str>, file_name: &str) -> String {
    match folder {
        Some(folder) => format!("{}/{}", folder, file_name),
        None => file_name.to_string(),
    }
}

impl InMemorySpecStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used before the store is shared.
    pub fn with_document(
        self,
        folder: Option<&str>,
        file_name: &str,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        let location = location_of(folder, file_name);
        let document_ref = DocumentRef::new(folder, file_name, location.clone());
        match self.documents.try_write() {
            Ok(mut documents) => {
                documents.insert(location, (document_ref, contents.into()));
            }
            Err(_) => warn!(location = %location, "Store is locked, document not added"),
        }
        self
    }

    /// Adds or replaces a document after construction.
    pub async fn insert(&self, folder: Option<&str>, file_name: &str, contents: impl Into<Vec<u8>>) {
        let location = location_of(folder, file_name);
        let document_ref = DocumentRef::new(folder, file_name, location.clone());
        self.documents
            .write()
            .await
            .insert(location, (document_ref, contents.into()));
    }

    /// Make `list_documents` fail with `StoreUnavailable`.
    pub fn set_list_failure(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Make `fetch` fail with `DocumentNotFound`.
    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SpecStore for InMemorySpecStore {
    async fn list_documents(&self) -> SpecResult<Vec<DocumentRef>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(SpecError::StoreUnavailable("in-memory store offline".to_string()));
        }

        let documents = self.documents.read().await;
        Ok(documents.values().map(|(doc, _)| doc.clone()).collect())
    }

    async fn fetch(&self, location: &str) -> SpecResult<Vec<u8>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(SpecError::not_found(location, "in-memory store offline"));
        }

        let documents = self.documents.read().await;
        documents
            .get(location)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| SpecError::not_found(location, "no such document"))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
