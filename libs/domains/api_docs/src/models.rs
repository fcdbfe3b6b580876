use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{SpecError, SpecResult};

/// Keys are bound as literal route segments, so they are restricted to this set.
static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_GROUP: &str = "default";

/// Returns true for file names the stores treat as specification documents.
pub fn is_spec_file(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    !lower.starts_with('.') && (lower.ends_with(".yaml") || lower.ends_with(".yml"))
}

/// File name without its last extension (`invoices.yaml` -> `invoices`).
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Catalog key for a document: `{folder}-{stem}` inside a folder, `{stem}` otherwise.
///
/// ```
/// use domain_api_docs::models::derive_key;
///
/// assert_eq!(derive_key(Some("crm"), "crm.yaml"), "crm-crm");
/// assert_eq!(derive_key(None, "words.yml"), "words");
/// ```
pub fn derive_key(folder: Option<&str>, file_name: &str) -> String {
    let stem = file_stem(file_name);
    match folder {
        Some(folder) if !folder.is_empty() => format!("{}-{}", folder, stem),
        _ => stem.to_string(),
    }
}

pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// One document found while enumerating a store, before it is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Grouping folder (subdirectory or object-store prefix), if any
    pub folder: Option<String>,
    pub file_name: String,
    /// Store-specific location handed back to `SpecStore::fetch`
    pub location: String,
    /// Key is the folder name alone (a folder holding a single document)
    pub folder_key: bool,
}

impl DocumentRef {
    pub fn new(
        folder: Option<impl Into<String>>,
        file_name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.map(Into::into),
            file_name: file_name.into(),
            location: location.into(),
            folder_key: false,
        }
    }

    /// Use the folder name as the key instead of `{folder}-{stem}`.
    pub fn with_folder_key(mut self) -> Self {
        self.folder_key = self.folder.as_deref().is_some_and(|f| !f.is_empty());
        self
    }

    pub fn key(&self) -> String {
        match self.folder.as_deref() {
            Some(folder) if self.folder_key => folder.to_string(),
            folder => derive_key(folder, &self.file_name),
        }
    }
}

/// Display fields read from a document's `info` block; each may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecMetadata {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Display fields after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl SpecMetadata {
    /// Reads `info.title`, `info.version` and `info.description`.
    ///
    /// Empty strings count as missing; numbers and booleans are kept as text
    /// so an unquoted `version: 2.1` still shows up.
    pub fn from_document(document: &Value) -> Self {
        let info = document.get("info");
        let field = |name: &str| info.and_then(|info| info.get(name)).and_then(scalar_text);

        Self {
            title: field("title"),
            version: field("version"),
            description: field("description"),
        }
    }

    /// Fill missing fields: title -> key, version -> "1.0.0",
    /// description -> "API documentation for {key}".
    pub fn resolve(self, key: &str) -> ResolvedMetadata {
        ResolvedMetadata {
            title: self.title.unwrap_or_else(|| key.to_string()),
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            description: self
                .description
                .unwrap_or_else(|| format!("API documentation for {}", key)),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A successfully loaded specification document.
#[derive(Debug, Clone)]
pub struct SpecEntry {
    pub key: String,
    pub title: String,
    pub version: String,
    pub description: String,
    pub folder: Option<String>,
    pub file_name: String,
    /// Where the raw document lives in the store (path or object key)
    pub location: String,
    /// Parsed document, YAML converted to a JSON value tree
    pub document: Value,
}

impl SpecEntry {
    pub fn new(document_ref: DocumentRef, document: Value) -> Self {
        let key = document_ref.key();
        let metadata = SpecMetadata::from_document(&document).resolve(&key);

        Self {
            key,
            title: metadata.title,
            version: metadata.version,
            description: metadata.description,
            folder: document_ref.folder,
            file_name: document_ref.file_name,
            location: document_ref.location,
            document,
        }
    }

    /// Landing page group: the folder, else the key prefix before the first
    /// '-', else `default`.
    pub fn group(&self) -> &str {
        match self.folder.as_deref() {
            Some(folder) if !folder.is_empty() => folder,
            _ => match self.key.split_once('-') {
                Some((prefix, _)) if !prefix.is_empty() => prefix,
                _ => DEFAULT_GROUP,
            },
        }
    }
}

/// All loaded entries keyed by catalog key, iterated in key order.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, SpecEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry; a key that is already present is rejected.
    pub fn insert(&mut self, entry: SpecEntry) -> SpecResult<()> {
        match self.entries.entry(entry.key.clone()) {
            Entry::Occupied(_) => Err(SpecError::DuplicateKey(entry.key)),
            Entry::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SpecEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &SpecEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_key_with_folder() {
        assert_eq!(derive_key(Some("crm"), "crm.yaml"), "crm-crm");
        assert_eq!(derive_key(Some("words"), "words.yaml"), "words-words");
        assert_eq!(derive_key(Some("billing"), "invoices.yml"), "billing-invoices");
    }

    #[test]
    fn test_derive_key_without_folder() {
        assert_eq!(derive_key(None, "payments.yaml"), "payments");
        assert_eq!(derive_key(Some(""), "payments.yaml"), "payments");
    }

    #[test]
    fn test_derive_key_strips_only_last_extension() {
        assert_eq!(derive_key(Some("v2"), "orders.openapi.yaml"), "v2-orders.openapi");
        assert_eq!(file_stem(".yaml"), ".yaml");
        assert_eq!(file_stem("README"), "README");
    }

    #[test]
    fn test_derive_key_distinct_pairs() {
        let pairs = [
            (Some("crm"), "crm.yaml"),
            (Some("crm"), "contacts.yaml"),
            (Some("words"), "crm.yaml"),
            (None, "crm.yaml"),
        ];
        let keys: std::collections::HashSet<_> =
            pairs.iter().map(|(f, n)| derive_key(*f, n)).collect();
        assert_eq!(keys.len(), pairs.len());
    }

    #[test]
    fn test_is_spec_file() {
        assert!(is_spec_file("openapi.yaml"));
        assert!(is_spec_file("Orders.YML"));
        assert!(!is_spec_file("notes.md"));
        assert!(!is_spec_file(".hidden.yaml"));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("billing-invoices"));
        assert!(is_valid_key("v1.2_orders"));
        assert!(!is_valid_key("my api"));
        assert!(!is_valid_key("{key}"));
        assert!(!is_valid_key(""));
    }

    #[test]
    fn test_metadata_from_info_block() {
        let doc = json!({
            "openapi": "3.0.0",
            "info": { "title": "Invoices API", "version": 2.1, "description": "  " }
        });
        let metadata = SpecMetadata::from_document(&doc);
        assert_eq!(metadata.title.as_deref(), Some("Invoices API"));
        assert_eq!(metadata.version.as_deref(), Some("2.1"));
        assert_eq!(metadata.description, None);
    }

    #[test]
    fn test_metadata_defaults() {
        let resolved = SpecMetadata::from_document(&json!({ "paths": {} })).resolve("crm-crm");
        assert_eq!(resolved.title, "crm-crm");
        assert_eq!(resolved.version, "1.0.0");
        assert_eq!(resolved.description, "API documentation for crm-crm");
    }

    #[test]
    fn test_entry_group() {
        let doc = json!({});
        let foldered = SpecEntry::new(DocumentRef::new(Some("billing"), "invoices.yaml", "x"), doc.clone());
        assert_eq!(foldered.group(), "billing");

        let prefixed = SpecEntry::new(DocumentRef::new(None::<String>, "crm-contacts.yaml", "y"), doc.clone());
        assert_eq!(prefixed.group(), "crm");

        let plain = SpecEntry::new(DocumentRef::new(None::<String>, "words.yaml", "z"), doc);
        assert_eq!(plain.group(), DEFAULT_GROUP);
    }

    #[test]
    fn test_folder_key_for_single_document_folder() {
        let single = DocumentRef::new(Some("crm"), "openapi.yaml", "crm/openapi.yaml").with_folder_key();
        assert_eq!(single.key(), "crm");

        let plain = DocumentRef::new(Some("crm"), "openapi.yaml", "crm/openapi.yaml");
        assert_eq!(plain.key(), "crm-openapi");

        // nothing to key by without a folder
        let root = DocumentRef::new(None::<String>, "words.yaml", "words.yaml").with_folder_key();
        assert_eq!(root.key(), "words");
    }

    #[test]
    fn test_catalog_rejects_duplicate_key() {
        let mut catalog = Catalog::new();
        let first = SpecEntry::new(DocumentRef::new(Some("a-b"), "c.yaml", "a-b/c.yaml"), json!({}));
        let second = SpecEntry::new(DocumentRef::new(Some("a"), "b-c.yaml", "a/b-c.yaml"), json!({}));

        catalog.insert(first).unwrap();
        let err = catalog.insert(second).unwrap_err();
        assert!(matches!(err, SpecError::DuplicateKey(key) if key == "a-b-c"));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a-b-c").unwrap().location, "a-b/c.yaml");
    }
}
