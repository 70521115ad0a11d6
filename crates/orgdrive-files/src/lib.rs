//! Orgdrive Files Layer
//!
//! This crate is the **drive engine**: tenant-scoped file operations
//! (upload, list, folders, delete, search, rename, public URLs) over a
//! pluggable object storage backend. It re-exports the shared models and
//! the storage entry points so an embedding application depends on a
//! single facade. Keep orchestration here; keep byte moving in
//! orgdrive-storage.

pub mod drive;
pub mod error;
pub mod folders;
pub mod resolver;
pub mod scope;

pub use drive::{Drive, UploadFile};
pub use error::{DriveError, DriveResult};
pub use folders::{folder_display_name, marker_key};
pub use orgdrive_core::{
    Config, EntryKind, FolderEntry, ObjectEntry, OrgId, RenameOutcome, UploadOutcome,
};
pub use orgdrive_storage::{
    create_storage, Storage, StorageBackend, StorageError, StorageResult,
};
pub use resolver::{resolve_org, FixedOrgResolver, OrgResolver};
pub use scope::{scoped_key, scoped_object_key, validate_name};
