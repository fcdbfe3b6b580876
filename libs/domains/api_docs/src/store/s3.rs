//! S3 object store
//!
//! Layout: `<prefix><folder>/<file>.yaml`. Top-level "folders" are the common
//! prefixes directly below `prefix`; when there are none the store falls back
//! to the YAML objects directly under `prefix`.
//!
//! ## Configuration
//!
//! Built from [`core_config::store::S3Config`]. Without explicit credentials
//! the AWS SDK default chain applies:
//! - Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
//! - Web identity token (EKS IRSA)
//! - IAM instance profile (EC2)
//! - Shared credentials file

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use core_config::store::S3Config;
use tracing::{debug, info, warn};

use super::SpecStore;
use crate::error::{SpecError, SpecResult};
use crate::models::{is_spec_file, DocumentRef};

const CREDENTIALS_PROVIDER: &str = "docs-hub-env";

#[derive(Debug, Clone)]
pub struct S3SpecStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3SpecStore {
    /// Create a store with an existing S3 client
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Create the client from configuration and the AWS SDK defaults.
    ///
    /// A custom endpoint (MinIO, LocalStack) switches to path-style addressing.
    pub async fn from_config(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                credentials.session_token.clone(),
                None,
                CREDENTIALS_PROVIDER,
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.endpoint.is_some())
            .build();

        info!(
            bucket = %config.bucket,
            prefix = %config.prefix,
            region = %config.region,
            "S3 specification store configured"
        );

        Self::new(
            Client::from_conf(s3_config),
            config.bucket.clone(),
            config.prefix.clone(),
        )
    }

    /// Folder names directly below the prefix.
    async fn list_folders(&self) -> SpecResult<Vec<String>> {
        let mut common_prefixes = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&self.prefix)
            .delimiter("/")
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                SpecError::StoreUnavailable(format!(
                    "listing s3://{}/{}: {}",
                    self.bucket,
                    self.prefix,
                    DisplayErrorContext(&e)
                ))
            })?;

            common_prefixes.extend(
                page.common_prefixes()
                    .iter()
                    .filter_map(|common| common.prefix().map(str::to_string)),
            );
        }

        Ok(folder_names(&self.prefix, common_prefixes.iter().map(String::as_str)))
    }

    /// YAML objects directly below `prefix` (no recursion into sub-prefixes).
    async fn list_objects(&self, prefix: &str, folder: Option<&str>) -> SpecResult<Vec<DocumentRef>> {
        let mut keys = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .delimiter("/")
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                SpecError::StoreUnavailable(format!(
                    "listing s3://{}/{}: {}",
                    self.bucket,
                    prefix,
                    DisplayErrorContext(&e)
                ))
            })?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }

        Ok(spec_documents(prefix, folder, keys.iter().map(String::as_str)))
    }
}

/// `docs/billing/` under prefix `docs/` -> `billing`
fn folder_name(prefix: &str, common_prefix: &str) -> Option<String> {
    let name = common_prefix
        .strip_prefix(prefix)
        .unwrap_or(common_prefix)
        .trim_end_matches('/');
    (!name.is_empty()).then(|| name.to_string())
}

/// Sorted, de-duplicated folder names from the common prefixes of a
/// delimited listing under `prefix`.
fn folder_names<'a>(prefix: &str, common_prefixes: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut folders: Vec<String> = common_prefixes
        .into_iter()
        .filter_map(|common| folder_name(prefix, common))
        .collect();
    folders.sort();
    folders.dedup();
    folders
}

/// Specification documents among `keys` that sit directly under `prefix`,
/// sorted by file name. Keys outside the prefix, in deeper sub-prefixes, or
/// without a YAML extension are ignored.
fn spec_documents<'a>(
    prefix: &str,
    folder: Option<&str>,
    keys: impl IntoIterator<Item = &'a str>,
) -> Vec<DocumentRef> {
    let mut documents: Vec<DocumentRef> = keys
        .into_iter()
        .filter_map(|key| {
            let file_name = key.strip_prefix(prefix)?;
            (!file_name.contains('/') && is_spec_file(file_name))
                .then(|| DocumentRef::new(folder, file_name, key))
        })
        .collect();
    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    documents
}

/// Concatenates per-folder listings in folder order, dropping folders whose
/// listing failed.
fn merge_folder_listings(listings: Vec<(String, SpecResult<Vec<DocumentRef>>)>) -> Vec<DocumentRef> {
    let mut documents = Vec::new();
    for (folder, listing) in listings {
        match listing {
            Ok(mut found) => {
                debug!(folder = %folder, count = found.len(), "Listed folder");
                documents.append(&mut found);
            }
            Err(e) => warn!(folder = %folder, error = %e, "Skipping unlistable folder"),
        }
    }
    documents
}

#[async_trait]
impl SpecStore for S3SpecStore {
    async fn list_documents(&self) -> SpecResult<Vec<DocumentRef>> {
        let folders = self.list_folders().await?;

        if folders.is_empty() {
            debug!(bucket = %self.bucket, "No folders found, listing flat");
            return self.list_objects(&self.prefix, None).await;
        }

        let mut listings = Vec::with_capacity(folders.len());
        for folder in folders {
            let folder_prefix = format!("{}{}/", self.prefix, folder);
            let listing = self.list_objects(&folder_prefix, Some(&folder)).await;
            listings.push((folder, listing));
        }

        Ok(merge_folder_listings(listings))
    }

    async fn fetch(&self, location: &str) -> SpecResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(location)
            .send()
            .await
            .map_err(|e| SpecError::not_found(location, DisplayErrorContext(&e)))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| SpecError::not_found(location, e))?;

        Ok(body.into_bytes().to_vec())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
