use crate::traits::{
    apply_list_options, ListOptions, ListedObject, PutObjectOptions, Storage, StorageError,
    StorageResult,
};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// A directory tree only emulates the flat key space: listings read one
/// directory level, and deletes prune directories left empty so prefixes
/// stop listing once their last object is gone, matching S3 semantics.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/orgdrive/files")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Keys that could escape the base storage directory are refused.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key must be a relative path".to_string(),
            ));
        }

        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StorageError::InvalidKey(format!(
                    "Storage key contains invalid segment: {}",
                    key
                )));
            }
        }

        Ok(self.base_path.join(key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Walk upward from `dir`, removing directories as long as they are
    /// empty, stopping at the storage root. `remove_dir` refuses non-empty
    /// directories, which ends the walk.
    async fn prune_empty_dirs(&self, mut dir: Option<&Path>) {
        while let Some(current) = dir {
            if current == self.base_path.as_path() || !current.starts_with(&self.base_path) {
                break;
            }
            if fs::remove_dir(current).await.is_err() {
                break;
            }
            dir = current.parent();
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, key: &str, data: Bytes, _opts: PutObjectOptions) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage put successful"
        );

        Ok(())
    }

    async fn list(&self, prefix: &str, opts: ListOptions) -> StorageResult<Vec<ListedObject>> {
        let dir = self.key_to_path(prefix)?;
        let start = std::time::Instant::now();

        let mut read_dir = match fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            // A prefix with nothing under it lists as empty.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %dir.display(),
                    prefix = %prefix,
                    "Local storage list failed"
                );
                return Err(StorageError::ListFailed(format!(
                    "Failed to read directory {}: {}",
                    dir.display(),
                    e
                )));
            }
        };

        let mut entries = Vec::new();

        while let Some(dirent) = read_dir
            .next_entry()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?
        {
            let name = dirent.file_name().to_string_lossy().to_string();
            let key = format!("{}/{}", prefix, name);
            let meta = dirent
                .metadata()
                .await
                .map_err(|e| StorageError::ListFailed(e.to_string()))?;

            if meta.is_dir() {
                entries.push(ListedObject {
                    name,
                    key,
                    size: 0,
                    last_modified: None,
                    is_prefix: true,
                });
            } else {
                entries.push(ListedObject {
                    name,
                    key,
                    size: meta.len(),
                    last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
                    is_prefix: false,
                });
            }
        }

        let entries = apply_list_options(entries, &opts);

        tracing::info!(
            prefix = %prefix,
            count = entries.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage list successful"
        );

        Ok(entries)
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
        let from_path = self.key_to_path(from_key)?;
        let to_path = self.key_to_path(to_key)?;

        let source_is_file = fs::metadata(&from_path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !source_is_file {
            return Err(StorageError::NotFound(from_key.to_string()));
        }

        self.ensure_parent_dir(&to_path).await?;

        fs::copy(&from_path, &to_path).await.map_err(|e| {
            StorageError::BackendError(format!(
                "Failed to copy {} to {}: {}",
                from_path.display(),
                to_path.display(),
                e
            ))
        })?;

        tracing::info!(
            from_key = %from_key,
            to_key = %to_key,
            from_path = %from_path.display(),
            to_path = %to_path.display(),
            "Local storage copy successful"
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        // A missing key deletes cleanly. A directory at the key is a
        // prefix, not a stored object, so there is nothing to remove.
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(_) => return Ok(()),
        };
        if meta.is_dir() {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        self.prune_empty_dirs(path.parent()).await;

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        // Directories are prefixes, not stored objects.
        Ok(fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false))
    }

    fn public_url(&self, key: &str) -> StorageResult<String> {
        self.key_to_path(key)?;
        Ok(self.generate_url(key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
