//! Tenant scoping for storage keys.
//!
//! Key format: `{org_code}` for an organization root, `{org_code}/{path}`
//! below it. Every key handed to a storage backend is built here, so no
//! drive operation can reach outside the caller's organization prefix.

use crate::error::{DriveError, DriveResult};
use orgdrive_core::OrgId;

/// Build a prefix key for the given organization and optional folder path.
///
/// Surrounding whitespace and slashes are trimmed, so `None`, `Some("")` and
/// `Some("/")` all address the organization root. An organization code that
/// is not a single clean path segment cannot scope keys and fails tenant
/// resolution.
pub fn scoped_key(org: &OrgId, relative: Option<&str>) -> DriveResult<String> {
    let org_code = org.as_str().trim();
    if validate_name(org_code).is_err() {
        return Err(DriveError::TenantResolution);
    }

    let relative = relative.map(str::trim).unwrap_or("");
    let relative = relative.trim_matches('/');
    if relative.is_empty() {
        return Ok(org_code.to_string());
    }

    for segment in relative.split('/') {
        validate_segment(segment)?;
    }

    Ok(format!("{}/{}", org_code, relative))
}

/// Build an object key for the given organization and relative path.
///
/// Unlike [`scoped_key`], the organization root itself is not a valid
/// object, so an empty path is rejected.
pub fn scoped_object_key(org: &OrgId, relative: &str) -> DriveResult<String> {
    let key = scoped_key(org, Some(relative))?;
    if !key.contains('/') {
        return Err(DriveError::InvalidPath(
            "a non-empty path is required".to_string(),
        ));
    }
    Ok(key)
}

/// Validate a bare file or folder name (a single path segment).
pub fn validate_name(name: &str) -> DriveResult<()> {
    if name.contains('/') {
        return Err(DriveError::InvalidPath(
            "name must not contain '/'".to_string(),
        ));
    }
    validate_segment(name)
}

fn validate_segment(segment: &str) -> DriveResult<()> {
    if segment.is_empty() {
        return Err(DriveError::InvalidPath("empty path segment".to_string()));
    }
    if segment == "." || segment == ".." {
        return Err(DriveError::InvalidPath(format!(
            "path traversal segment: {}",
            segment
        )));
    }
    if segment.contains('\0') {
        return Err(DriveError::InvalidPath(
            "path contains a NUL byte".to_string(),
        ));
    }
    Ok(())
}

/// Split a key into its parent prefix and final segment.
pub(crate) fn split_parent(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once('/')
}
