use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::FOLDER_MARKER;

/// Kind of entry produced by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// Logical view of a stored object, or of a folder derived from a key
/// prefix when it appears in a mixed listing.
///
/// Folder rows carry no size, content type, or timestamp; they exist only
/// as long as at least one object shares their prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Display name (final path segment, marker suffix stripped for folders).
    pub name: String,
    /// Fully qualified storage key, organization prefix included.
    pub key: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub kind: EntryKind,
}

impl ObjectEntry {
    /// Whether this entry is a folder marker object rather than user data.
    pub fn is_marker(&self) -> bool {
        self.kind == EntryKind::File && self.name == FOLDER_MARKER
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}
