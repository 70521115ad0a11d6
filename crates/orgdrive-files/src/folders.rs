//! Folder emulation over a flat key space.
//!
//! Object storage has no directories. A folder exists as long as at least
//! one key lives under its prefix, so an empty folder is materialized by
//! writing a zero-byte `.keep` marker at `{prefix}/.keep`. A parent listing
//! reports the prefix as a folder row; the marker object itself shows up
//! only when listing inside the folder.

use orgdrive_core::constants::FOLDER_MARKER;
use orgdrive_core::{EntryKind, FolderEntry, ObjectEntry};
use orgdrive_storage::ListedObject;

/// Marker object key for the given folder key.
pub fn marker_key(folder_key: &str) -> String {
    format!("{}/{}", folder_key.trim_end_matches('/'), FOLDER_MARKER)
}

/// Display name for a folder, with a trailing `/.keep` marker segment and
/// any trailing slash stripped. A name that merely ends in `.keep` is kept
/// as is.
pub fn folder_display_name(raw: &str) -> &str {
    raw.strip_suffix(FOLDER_MARKER)
        .filter(|rest| rest.ends_with('/'))
        .unwrap_or(raw)
        .trim_end_matches('/')
}

/// Map a storage listing row to a drive entry.
pub(crate) fn to_entry(obj: ListedObject) -> ObjectEntry {
    if obj.is_prefix {
        ObjectEntry {
            name: folder_display_name(&obj.name).to_string(),
            key: obj.key,
            size: 0,
            content_type: None,
            created_at: None,
            kind: EntryKind::Folder,
        }
    } else {
        ObjectEntry {
            name: obj.name,
            key: obj.key,
            size: obj.size,
            content_type: None,
            created_at: obj.last_modified,
            kind: EntryKind::File,
        }
    }
}

/// Map a storage prefix row to a folder entry.
pub(crate) fn to_folder(obj: ListedObject) -> FolderEntry {
    FolderEntry {
        name: folder_display_name(&obj.name).to_string(),
        prefix: obj.key,
    }
}
