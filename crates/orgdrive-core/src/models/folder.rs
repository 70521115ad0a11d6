use serde::{Deserialize, Serialize};

/// A logical folder derived from a key prefix.
///
/// Folders are not persisted anywhere: one of these exists exactly when at
/// least one object (possibly only the folder's own marker) is stored under
/// `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Display name, trailing delimiter and marker suffix stripped.
    pub name: String,
    /// Fully qualified key prefix, organization prefix included.
    pub prefix: String,
}
