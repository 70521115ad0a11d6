use orgdrive_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by drive operations
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("No organization could be resolved for the current caller")]
    TenantResolution,

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File size {size} exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("A file named \"{0}\" already exists")]
    DuplicateFile(String),

    #[error("Copy failed: {0}")]
    CopyFailed(String),

    #[error("Rename incomplete: \"{source_key}\" was copied to \"{destination_key}\" but the original could not be removed: {detail}")]
    RenameIncomplete {
        source_key: String,
        destination_key: String,
        detail: String,
    },

    #[error("No public URL available for {0}")]
    NoPublicUrl(String),

    #[error("Storage backend error: {0}")]
    Backend(#[from] StorageError),
}

pub type DriveResult<T> = Result<T, DriveError>;
