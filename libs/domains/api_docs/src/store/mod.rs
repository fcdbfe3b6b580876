//! Specification stores
//!
//! A store enumerates specification documents and hands back their raw bytes.
//! The catalog is built from [`SpecStore::list_documents`] once at startup;
//! the raw passthrough route calls [`SpecStore::fetch`] on every request.

pub mod local;
pub mod memory;
pub mod s3;

pub use local::LocalSpecStore;
pub use memory::InMemorySpecStore;
pub use s3::S3SpecStore;

use async_trait::async_trait;

use crate::error::SpecResult;
use crate::models::DocumentRef;

/// Read-only access to a collection of specification documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpecStore: Send + Sync {
    /// Enumerate every document in the store.
    ///
    /// Fails with `StoreUnavailable` only when the store as a whole cannot
    /// be listed.
    async fn list_documents(&self) -> SpecResult<Vec<DocumentRef>>;

    /// Fetch the raw serialized bytes of one document.
    async fn fetch(&self, location: &str) -> SpecResult<Vec<u8>>;

    /// Store name for logs
    fn name(&self) -> &'static str;
}
