//! Shared constants
//!
//! Fixed limits and well-known names used across the storage and files
//! layers. None of these are configurable at runtime.

/// Maximum accepted upload size in bytes (5 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Name of the zero-byte object that keeps an otherwise-empty folder prefix
/// visible in listings.
pub const FOLDER_MARKER: &str = ".keep";

/// Number of entries returned per listing page.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Content type applied to uploads when the caller supplies none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Cache policy attached to uploaded objects.
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=3600";
