//! Orgdrive Core Library
//!
//! This crate provides the domain models, constants, and configuration that
//! are shared across all orgdrive components.

pub mod config;
pub mod constants;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use models::{EntryKind, FolderEntry, ObjectEntry, OrgId, RenameOutcome, UploadOutcome};
pub use storage_types::StorageBackend;
