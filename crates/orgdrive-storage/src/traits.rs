//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use orgdrive_core::constants::DEFAULT_LIST_LIMIT;
use orgdrive_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Options applied when storing an object.
#[derive(Debug, Clone, Default)]
pub struct PutObjectOptions {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

/// Options applied to a delimited listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Maximum number of entries returned after filtering and sorting.
    pub limit: usize,
    /// Number of entries skipped after filtering and sorting.
    pub offset: usize,
    /// Case-insensitive substring filter on entry names.
    pub search: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
            search: None,
        }
    }
}

/// One row of a delimited listing: either an object stored directly under
/// the listed prefix, or an immediate child prefix.
#[derive(Debug, Clone)]
pub struct ListedObject {
    /// Final path segment.
    pub name: String,
    /// Full key of the object, or full prefix for a child prefix row.
    pub key: String,
    /// Object size in bytes; zero for prefix rows.
    pub size: u64,
    /// Backend modification timestamp; absent for prefix rows.
    pub last_modified: Option<DateTime<Utc>>,
    pub is_prefix: bool,
}

/// Storage abstraction trait
///
/// All storage backends (S3-compatible, local filesystem) must implement
/// this trait. The key space is flat: backends have no directory concept,
/// and `list` is the only operation that interprets the `/` delimiter.
///
/// **Key format:** Keys are organization-scoped: `{org}/{relative_path}`.
/// See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store an object at the given key, overwriting any existing object.
    async fn put(&self, key: &str, data: Bytes, opts: PutObjectOptions) -> StorageResult<()>;

    /// List the entries one delimiter level below a prefix.
    ///
    /// Objects and immediate child prefixes are merged into a single
    /// finite page: the search filter, name-ascending sort, offset, and
    /// limit from `opts` are applied in that order. Listing a prefix with
    /// nothing under it returns an empty page.
    async fn list(&self, prefix: &str, opts: ListOptions) -> StorageResult<Vec<ListedObject>>;

    /// Copy an object to a new key, overwriting any existing destination.
    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()>;

    /// Delete the object at the given key.
    ///
    /// Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Publicly accessible URL for the object at the given key.
    ///
    /// Purely derived from backend configuration; existence of the object
    /// is not checked here.
    fn public_url(&self, key: &str) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Shape a raw listing into the page contract shared by all backends:
/// filter by name substring, sort name-ascending, then apply offset and
/// limit.
pub(crate) fn apply_list_options(
    mut entries: Vec<ListedObject>,
    opts: &ListOptions,
) -> Vec<ListedObject> {
    if let Some(ref search) = opts.search {
        let needle = search.to_lowercase();
        entries.retain(|entry| entry.name.to_lowercase().contains(&needle));
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
        .into_iter()
        .skip(opts.offset)
        .take(opts.limit)
        .collect()
}
