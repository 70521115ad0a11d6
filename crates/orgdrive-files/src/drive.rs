use crate::error::{DriveError, DriveResult};
use crate::folders::{marker_key, to_entry, to_folder};
use crate::scope::{scoped_key, scoped_object_key, split_parent, validate_name};
use bytes::Bytes;
use chrono::Utc;
use orgdrive_core::constants::{DEFAULT_CACHE_CONTROL, DEFAULT_CONTENT_TYPE, MAX_FILE_SIZE_BYTES};
use orgdrive_core::{EntryKind, FolderEntry, ObjectEntry, OrgId, RenameOutcome, UploadOutcome};
use orgdrive_storage::{ListOptions, PutObjectOptions, Storage};
use std::sync::Arc;

/// Payload handed to [`Drive::upload`].
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    /// MIME type; `application/octet-stream` when absent.
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Tenant-scoped file operations over an object storage backend.
///
/// Holds only the backend handle, so it is cheap to clone and one instance
/// serves every organization. Operations take the organization explicitly;
/// there is no ambient tenant state.
#[derive(Clone)]
pub struct Drive {
    storage: Arc<dyn Storage>,
}

impl Drive {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Drive { storage }
    }

    /// The underlying storage backend handle.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Whether `parent` already holds an entry named exactly `name`.
    ///
    /// Reads one name-filtered page and scans for an exact match; folder
    /// rows collide the same as files. Read-then-act; not serialized
    /// against concurrent writers.
    async fn name_exists_in(&self, parent: &str, name: &str) -> DriveResult<bool> {
        let page = self
            .storage
            .list(
                parent,
                ListOptions {
                    search: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(page.iter().any(|e| e.name == name))
    }

    /// Upload a file into a folder (or the organization root).
    ///
    /// Fails without writing when the payload exceeds the fixed size limit
    /// or when the target folder already holds an entry with the same name.
    /// Two concurrent uploads of the same name can both pass the duplicate
    /// check; the later write wins.
    #[tracing::instrument(skip(self, file), fields(org = %org, file_name = %file.name))]
    pub async fn upload(
        &self,
        org: &OrgId,
        folder: Option<&str>,
        file: UploadFile,
    ) -> DriveResult<UploadOutcome> {
        let size = file.data.len() as u64;
        if size > MAX_FILE_SIZE_BYTES {
            return Err(DriveError::FileTooLarge {
                size,
                limit: MAX_FILE_SIZE_BYTES,
            });
        }
        validate_name(&file.name)?;

        let parent = scoped_key(org, folder)?;
        if self.name_exists_in(&parent, &file.name).await? {
            tracing::debug!(parent = %parent, "Upload rejected, name already taken");
            return Err(DriveError::DuplicateFile(file.name));
        }

        let key = format!("{}/{}", parent, file.name);
        let content_type = file
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        self.storage
            .put(
                &key,
                file.data,
                PutObjectOptions {
                    content_type: Some(content_type.clone()),
                    cache_control: Some(DEFAULT_CACHE_CONTROL.to_string()),
                },
            )
            .await?;

        let entry = ObjectEntry {
            name: file.name,
            key,
            size,
            content_type: Some(content_type),
            created_at: Some(Utc::now()),
            kind: EntryKind::File,
        };
        let message = format!("File \"{}\" uploaded successfully", entry.name);

        Ok(UploadOutcome { entry, message })
    }

    /// List the entries directly under a folder.
    ///
    /// One backend page (100 entries), name ascending: file objects plus one
    /// folder row per child prefix. Folder markers inside the listed folder
    /// appear as files; [`ObjectEntry::is_marker`] identifies them.
    #[tracing::instrument(skip(self), fields(org = %org))]
    pub async fn list(&self, org: &OrgId, folder: Option<&str>) -> DriveResult<Vec<ObjectEntry>> {
        let prefix = scoped_key(org, folder)?;
        let page = self.storage.list(&prefix, ListOptions::default()).await?;
        Ok(page.into_iter().map(to_entry).collect())
    }

    /// List only the folders directly under a folder.
    #[tracing::instrument(skip(self), fields(org = %org))]
    pub async fn list_folders(
        &self,
        org: &OrgId,
        folder: Option<&str>,
    ) -> DriveResult<Vec<FolderEntry>> {
        let prefix = scoped_key(org, folder)?;
        let page = self.storage.list(&prefix, ListOptions::default()).await?;
        Ok(page
            .into_iter()
            .filter(|e| e.is_prefix)
            .map(to_folder)
            .collect())
    }

    /// Create an empty folder by writing its marker object.
    ///
    /// The name may itself be a relative path (`reports/2023`), creating
    /// nested folders in one call. Creating a folder that already exists
    /// rewrites the marker in place, so the call is idempotent.
    #[tracing::instrument(skip(self), fields(org = %org, name = %name))]
    pub async fn create_folder(&self, org: &OrgId, name: &str) -> DriveResult<FolderEntry> {
        let folder_key = scoped_object_key(org, name)?;
        let marker = marker_key(&folder_key);

        self.storage
            .put(&marker, Bytes::new(), PutObjectOptions::default())
            .await?;

        let display_name = split_parent(&folder_key)
            .map(|(_, last)| last)
            .unwrap_or(name)
            .to_string();

        Ok(FolderEntry {
            name: display_name,
            prefix: folder_key,
        })
    }

    /// Delete exactly the object at the given path.
    ///
    /// Removing a folder's `.keep` marker drops the folder from listings
    /// once nothing else shares its prefix; children are never cascaded.
    /// The organization root itself is not a deletable object.
    #[tracing::instrument(skip(self), fields(org = %org, path = %relative_path))]
    pub async fn delete(&self, org: &OrgId, relative_path: &str) -> DriveResult<()> {
        let key = scoped_object_key(org, relative_path)?;
        self.storage.delete(&key).await?;
        Ok(())
    }

    /// Case-insensitive substring search over the organization root.
    ///
    /// Scans a single page (100 entries) of the root listing, so this is a
    /// bounded, best-effort search rather than a full-tenant index.
    #[tracing::instrument(skip(self), fields(org = %org, term = %term))]
    pub async fn search(&self, org: &OrgId, term: &str) -> DriveResult<Vec<ObjectEntry>> {
        let prefix = scoped_key(org, None)?;
        let page = self.storage.list(&prefix, ListOptions::default()).await?;

        let needle = term.to_lowercase();
        Ok(page
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .map(to_entry)
            .collect())
    }

    /// Rename a file within its folder: copy to the new key, then delete
    /// the original.
    ///
    /// The two steps are not atomic. A failed copy leaves the source
    /// untouched and reports [`DriveError::CopyFailed`]. A failed delete
    /// after a successful copy leaves both objects behind and reports
    /// [`DriveError::RenameIncomplete`] with both keys, so the caller can
    /// retry the removal or reconcile by hand.
    #[tracing::instrument(skip(self), fields(org = %org, path = %old_relative_path, new_name = %new_name))]
    pub async fn rename(
        &self,
        org: &OrgId,
        old_relative_path: &str,
        new_name: &str,
    ) -> DriveResult<RenameOutcome> {
        validate_name(new_name)?;

        let source = scoped_object_key(org, old_relative_path)?;
        let (parent, _) = split_parent(&source)
            .ok_or_else(|| DriveError::InvalidPath("not a file path".to_string()))?;
        let destination = format!("{}/{}", parent, new_name);

        if self.name_exists_in(parent, new_name).await? {
            return Err(DriveError::DuplicateFile(new_name.to_string()));
        }

        if let Err(e) = self.storage.copy(&source, &destination).await {
            tracing::error!(
                error = %e,
                source = %source,
                destination = %destination,
                "Rename copy step failed"
            );
            return Err(DriveError::CopyFailed(e.to_string()));
        }

        if let Err(e) = self.storage.delete(&source).await {
            tracing::warn!(
                error = %e,
                source = %source,
                destination = %destination,
                "Rename delete step failed, both objects remain"
            );
            return Err(DriveError::RenameIncomplete {
                source_key: source,
                destination_key: destination,
                detail: e.to_string(),
            });
        }

        let message = format!("File renamed to \"{}\" successfully", new_name);
        Ok(RenameOutcome {
            from_key: source,
            to_key: destination,
            message,
        })
    }

    /// Resolve the public URL for a stored object.
    ///
    /// The object must exist. Access control on the resulting URL is the
    /// bucket policy's concern, not this layer's.
    #[tracing::instrument(skip(self), fields(org = %org, path = %relative_path))]
    pub async fn public_url(&self, org: &OrgId, relative_path: &str) -> DriveResult<String> {
        let key = scoped_object_key(org, relative_path)?;

        match self.storage.exists(&key).await {
            Ok(true) => {}
            Ok(false) => return Err(DriveError::NoPublicUrl(key)),
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Existence check failed resolving public URL");
                return Err(DriveError::NoPublicUrl(key));
            }
        }

        match self.storage.public_url(&key) {
            Ok(url) => Ok(url),
            Err(e) => {
                tracing::error!(error = %e, key = %key, "Backend produced no public URL");
                Err(DriveError::NoPublicUrl(key))
            }
        }
    }
}
