//! Orgdrive Storage Library
//!
//! This crate provides the object storage abstraction for orgdrive.
//! It includes the Storage trait and implementations for S3-compatible
//! services and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are organization-scoped: `{org}` for an organization root, or
//! `{org}/{relative_path}` below it. Keys never contain `..` segments or a
//! leading `/`. Key construction is centralized in the files layer; the
//! local backend additionally refuses keys that would escape its root
//! directory.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use orgdrive_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{
    ListOptions, ListedObject, PutObjectOptions, Storage, StorageError, StorageResult,
};
