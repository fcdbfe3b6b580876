//! Local directory store
//!
//! Layout: `<root>/<folder>/<file>.yaml`. Each subdirectory of the root is a
//! folder; YAML files placed directly under the root have no folder.
//!
//! A folder holding a single document (`crm/openapi.yaml`) is keyed by the
//! folder name alone (`crm`). Folders with several documents use
//! `{folder}-{stem}`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use super::SpecStore;
use crate::error::{SpecError, SpecResult};
use crate::models::{is_spec_file, DocumentRef};

#[derive(Debug, Clone)]
pub struct LocalSpecStore {
    root: PathBuf,
}

impl LocalSpecStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Spec files directly inside `dir`, sorted by name.
    async fn spec_files(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_spec_file(&name) {
                continue;
            }
            // metadata() follows symlinks, file_type() would not
            match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => files.push((name, entry.path())),
                Ok(_) => {}
                Err(e) => warn!(path = %entry.path().display(), error = %e, "Skipping unreadable document"),
            }
        }

        files.sort();
        Ok(files)
    }

    async fn folders(&self) -> std::io::Result<Vec<(String, PathBuf)>> {
        let mut folders = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_dir() => folders.push((name, entry.path())),
                Ok(_) => {}
                Err(e) => warn!(path = %entry.path().display(), error = %e, "Skipping unreadable entry"),
            }
        }

        folders.sort();
        Ok(folders)
    }
}

#[async_trait]
impl SpecStore for LocalSpecStore {
    async fn list_documents(&self) -> SpecResult<Vec<DocumentRef>> {
        let unavailable =
            |e: std::io::Error| SpecError::StoreUnavailable(format!("{}: {}", self.root.display(), e));

        let mut documents = Vec::new();

        for (file_name, path) in Self::spec_files(&self.root).await.map_err(unavailable)? {
            documents.push(DocumentRef::new(
                None::<String>,
                file_name,
                path.to_string_lossy(),
            ));
        }

        for (folder, dir) in self.folders().await.map_err(unavailable)? {
            match Self::spec_files(&dir).await {
                Ok(files) => {
                    debug!(folder = %folder, count = files.len(), "Listed folder");
                    let single = files.len() == 1;
                    for (file_name, path) in files {
                        let document =
                            DocumentRef::new(Some(folder.clone()), file_name, path.to_string_lossy());
                        documents.push(if single { document.with_folder_key() } else { document });
                    }
                }
                Err(e) => warn!(folder = %folder, error = %e, "Skipping unreadable folder"),
            }
        }

        Ok(documents)
    }

    async fn fetch(&self, location: &str) -> SpecResult<Vec<u8>> {
        fs::read(location)
            .await
            .map_err(|e| SpecError::not_found(location, e))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_catalog;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_lists_folders_and_root_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "billing/payments.yaml", "openapi: 3.0.0");
        write(dir.path(), "billing/invoices.yaml", "openapi: 3.0.0");
        write(dir.path(), "billing/README.md", "# notes");
        write(dir.path(), "crm/crm.yml", "openapi: 3.0.0");
        write(dir.path(), "words.yaml", "openapi: 3.0.0");
        write(dir.path(), ".git/config.yaml", "ignored: true");

        let store = LocalSpecStore::new(dir.path());
        let documents = store.list_documents().await.unwrap();

        let keys: Vec<String> = documents.iter().map(DocumentRef::key).collect();
        assert_eq!(
            keys,
            vec!["words", "billing-invoices", "billing-payments", "crm"]
        );
        assert_eq!(documents[1].folder.as_deref(), Some("billing"));
        assert!(documents[1].location.ends_with("invoices.yaml"));
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "crm/crm.yaml", "openapi: 3.0.0\n# comment kept\n");

        let store = LocalSpecStore::new(dir.path());
        let documents = store.list_documents().await.unwrap();
        let bytes = store.fetch(&documents[0].location).await.unwrap();

        assert_eq!(bytes, b"openapi: 3.0.0\n# comment kept\n");
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSpecStore::new(dir.path());
        let missing = dir.path().join("gone.yaml");

        let err = store.fetch(&missing.to_string_lossy()).await.unwrap_err();
        assert!(matches!(err, SpecError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_single_document_folder_is_keyed_by_folder() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "crm/openapi.yaml", "info:\n  title: CRM\n");
        write(dir.path(), "words/openapi.yaml", "info:\n  title: Words\n");

        let store = LocalSpecStore::new(dir.path());
        let catalog = load_catalog(&store).await.unwrap();

        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["crm", "words"]);
        assert_eq!(catalog.get("crm").unwrap().group(), "crm");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dangling_symlink_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "crm/crm.yaml", "openapi: 3.0.0");
        write(dir.path(), "billing/invoices.yaml", "openapi: 3.0.0");
        write(dir.path(), "billing/payments.yaml", "openapi: 3.0.0");
        std::os::unix::fs::symlink(dir.path().join("gone.yaml"), dir.path().join("old.yaml")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("billing/gone.yaml"),
            dir.path().join("billing/refunds.yaml"),
        )
        .unwrap();

        let store = LocalSpecStore::new(dir.path());
        let catalog = load_catalog(&store).await.unwrap();

        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["billing-invoices", "billing-payments", "crm"]);
    }

    #[tokio::test]
    async fn test_missing_root_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSpecStore::new(dir.path().join("does-not-exist"));

        let err = store.list_documents().await.unwrap_err();
        assert!(matches!(err, SpecError::StoreUnavailable(_)));
    }
}
