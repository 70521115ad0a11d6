use serde::Serialize;

use crate::models::ObjectEntry;

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub entry: ObjectEntry,
    /// User-facing confirmation message.
    pub message: String,
}

/// Result of a fully completed rename.
///
/// A rename that copied the destination but failed to remove the source does
/// not produce one of these; it surfaces as an error carrying both keys.
#[derive(Debug, Clone, Serialize)]
pub struct RenameOutcome {
    pub from_key: String,
    pub to_key: String,
    /// User-facing confirmation message.
    pub message: String,
}
