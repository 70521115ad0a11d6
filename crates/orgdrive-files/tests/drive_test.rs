//! Drive engine integration tests.
//!
//! Run with: `cargo test -p orgdrive-files --test drive_test`
//! Every test runs against the local backend in a fresh temp directory.

use async_trait::async_trait;
use bytes::Bytes;
use orgdrive_files::{Drive, DriveError, EntryKind, OrgId, Storage, StorageError, UploadFile};
use orgdrive_storage::{ListOptions, ListedObject, LocalStorage, PutObjectOptions, StorageResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

const ONE_MIB: usize = 1024 * 1024;

async fn drive_in(dir: &TempDir) -> Drive {
    let storage = LocalStorage::new(dir.path(), "http://localhost:3000/files".to_string())
        .await
        .expect("local storage");
    Drive::new(Arc::new(storage))
}

fn file(name: &str, data: &[u8]) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        content_type: None,
        data: Bytes::copy_from_slice(data),
    }
}

fn org(code: &str) -> OrgId {
    OrgId::new(code)
}

/// Wraps a real backend and fails copy or delete on demand, to drive the
/// rename operation into its partial-failure states.
struct FlakyStorage {
    inner: Arc<dyn Storage>,
    fail_copy: AtomicBool,
    fail_delete: AtomicBool,
}

impl FlakyStorage {
    fn wrap(inner: Arc<dyn Storage>) -> Arc<Self> {
        Arc::new(FlakyStorage {
            inner,
            fail_copy: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn put(&self, key: &str, data: Bytes, opts: PutObjectOptions) -> StorageResult<()> {
        self.inner.put(key, data, opts).await
    }

    async fn list(&self, prefix: &str, opts: ListOptions) -> StorageResult<Vec<ListedObject>> {
        self.inner.list(prefix, opts).await
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()> {
        if self.fail_copy.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError(
                "injected copy failure".to_string(),
            ));
        }
        self.inner.copy(from_key, to_key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed(
                "injected delete failure".to_string(),
            ));
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    fn public_url(&self, key: &str) -> StorageResult<String> {
        self.inner.public_url(key)
    }

    fn backend_type(&self) -> orgdrive_files::StorageBackend {
        self.inner.backend_type()
    }
}

async fn flaky_drive_in(dir: &TempDir) -> (Drive, Arc<FlakyStorage>) {
    let storage = LocalStorage::new(dir.path(), "http://localhost:3000/files".to_string())
        .await
        .expect("local storage");
    let flaky = FlakyStorage::wrap(Arc::new(storage));
    let handle: Arc<dyn Storage> = flaky.clone();
    (Drive::new(handle), flaky)
}

#[tokio::test]
async fn test_upload_then_list_round_trip() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let outcome = drive
        .upload(
            &org,
            None,
            UploadFile {
                name: "invoice.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                data: Bytes::from_static(b"%PDF-1.4"),
            },
        )
        .await
        .expect("upload");

    assert_eq!(outcome.entry.key, "ORG123/invoice.pdf");
    assert_eq!(outcome.entry.size, 8);
    assert_eq!(outcome.entry.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(outcome.message, "File \"invoice.pdf\" uploaded successfully");

    let entries = drive.list(&org, None).await.expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "invoice.pdf");
    assert_eq!(entries[0].kind, EntryKind::File);
    assert_eq!(entries[0].size, 8);
    assert!(entries[0].created_at.is_some());
}

#[tokio::test]
async fn test_upload_defaults_content_type() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let outcome = drive
        .upload(&org, None, file("notes.txt", b"hello"))
        .await
        .expect("upload");
    assert_eq!(
        outcome.entry.content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn test_upload_rejects_oversized_payload() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let oversized = vec![0u8; 5 * ONE_MIB + 1];
    let err = drive
        .upload(&org, None, file("big.bin", &oversized))
        .await
        .unwrap_err();
    match err {
        DriveError::FileTooLarge { size, limit } => {
            assert_eq!(size, 5 * 1024 * 1024 + 1);
            assert_eq!(limit, 5 * 1024 * 1024);
        }
        other => panic!("expected FileTooLarge, got {:?}", other),
    }

    // Nothing was written.
    let entries = drive.list(&org, None).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_duplicate_name() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive
        .upload(&org, None, file("invoice.pdf", b"original"))
        .await
        .expect("first upload");

    let err = drive
        .upload(&org, None, file("invoice.pdf", b"other"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DriveError::DuplicateFile(ref name) if name == "invoice.pdf"),
        "expected DuplicateFile, got {:?}",
        err
    );

    let entries = drive.list(&org, None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].size, 8, "original object untouched");
}

#[tokio::test]
async fn test_upload_into_folder() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let outcome = drive
        .upload(&org, Some("docs"), file("invoice.pdf", b"pdf"))
        .await
        .expect("upload into folder");
    assert_eq!(outcome.entry.key, "ORG123/docs/invoice.pdf");

    let inside = drive.list(&org, Some("docs")).await.unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].name, "invoice.pdf");

    // The root listing shows the folder row, not the nested file.
    let root = drive.list(&org, None).await.unwrap();
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].name, "docs");
    assert_eq!(root[0].kind, EntryKind::Folder);

    // A duplicate name in another folder is fine.
    drive
        .upload(&org, None, file("invoice.pdf", b"pdf"))
        .await
        .expect("same name at root");
}

#[tokio::test]
async fn test_tenant_isolation() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org1 = org("ORG1");
    let org2 = org("ORG2");

    drive
        .upload(&org1, None, file("secret.txt", b"org1 data"))
        .await
        .expect("upload for org1");

    let entries = drive.list(&org2, None).await.unwrap();
    assert!(entries.is_empty(), "org2 must not see org1 objects");

    let found = drive.search(&org2, "secret").await.unwrap();
    assert!(found.is_empty(), "org2 search must not see org1 objects");

    let err = drive.public_url(&org2, "secret.txt").await.unwrap_err();
    assert!(matches!(err, DriveError::NoPublicUrl(_)));
}

#[tokio::test]
async fn test_folder_round_trip() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let folder = drive.create_folder(&org, "Reports").await.expect("create");
    assert_eq!(folder.name, "Reports");
    assert_eq!(folder.prefix, "ORG123/Reports");

    let entries = drive.list(&org, None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Reports");
    assert!(entries[0].is_folder());

    // Inside the folder the marker is visible as a file.
    let inside = drive.list(&org, Some("Reports")).await.unwrap();
    assert_eq!(inside.len(), 1);
    assert!(inside[0].is_marker());

    // Deleting the marker removes the folder from the next listing.
    drive.delete(&org, "Reports/.keep").await.expect("delete marker");
    let entries = drive.list(&org, None).await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_create_folder_nested_and_idempotent() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let folder = drive
        .create_folder(&org, "reports/2023")
        .await
        .expect("nested create");
    assert_eq!(folder.name, "2023");
    assert_eq!(folder.prefix, "ORG123/reports/2023");

    let folders = drive.list_folders(&org, Some("reports")).await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "2023");

    // Creating it again rewrites the marker and succeeds.
    let again = drive
        .create_folder(&org, "reports/2023")
        .await
        .expect("repeat create");
    assert_eq!(again.prefix, folder.prefix);
}

#[tokio::test]
async fn test_folder_paths_are_not_objects() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive.create_folder(&org, "docs").await.unwrap();

    // A folder has no public URL of its own.
    let err = drive.public_url(&org, "docs").await.unwrap_err();
    assert!(
        matches!(err, DriveError::NoPublicUrl(ref key) if key == "ORG123/docs"),
        "expected NoPublicUrl, got {:?}",
        err
    );

    // Deleting the folder path is a no-op; the marker keeps the folder alive.
    drive.delete(&org, "docs").await.expect("noop delete");
    let entries = drive.list(&org, None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "docs");
    assert!(entries[0].is_folder());
}

#[tokio::test]
async fn test_folder_name_collides_with_uploads_and_renames() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive.create_folder(&org, "docs").await.unwrap();
    drive
        .upload(&org, None, file("report.pdf", b"pdf"))
        .await
        .unwrap();

    let err = drive.upload(&org, None, file("docs", b"x")).await.unwrap_err();
    assert!(
        matches!(err, DriveError::DuplicateFile(ref name) if name == "docs"),
        "expected DuplicateFile, got {:?}",
        err
    );

    let err = drive.rename(&org, "report.pdf", "docs").await.unwrap_err();
    assert!(matches!(err, DriveError::DuplicateFile(ref name) if name == "docs"));

    // Neither collision wrote anything.
    let entries = drive.list(&org, None).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["docs", "report.pdf"]);
}

#[tokio::test]
async fn test_list_folders_skips_files() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive.create_folder(&org, "docs").await.unwrap();
    drive
        .upload(&org, None, file("loose.txt", b"x"))
        .await
        .unwrap();

    let folders = drive.list_folders(&org, None).await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "docs");
}

#[tokio::test]
async fn test_rename_moves_object() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive
        .upload(&org, None, file("invoice.pdf", b"pdf"))
        .await
        .unwrap();

    let outcome = drive
        .rename(&org, "invoice.pdf", "invoice-2023.pdf")
        .await
        .expect("rename");
    assert_eq!(outcome.from_key, "ORG123/invoice.pdf");
    assert_eq!(outcome.to_key, "ORG123/invoice-2023.pdf");
    assert_eq!(
        outcome.message,
        "File renamed to \"invoice-2023.pdf\" successfully"
    );

    let entries = drive.list(&org, None).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["invoice-2023.pdf"]);

    let err = drive.public_url(&org, "invoice.pdf").await.unwrap_err();
    assert!(matches!(err, DriveError::NoPublicUrl(_)), "source is gone");
}

#[tokio::test]
async fn test_rename_rejects_existing_target() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive.upload(&org, None, file("a.txt", b"a")).await.unwrap();
    drive.upload(&org, None, file("b.txt", b"bb")).await.unwrap();

    let err = drive.rename(&org, "a.txt", "b.txt").await.unwrap_err();
    assert!(matches!(err, DriveError::DuplicateFile(ref name) if name == "b.txt"));

    // Neither object was touched.
    let entries = drive.list(&org, None).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(entries[0].size, 1);
    assert_eq!(entries[1].size, 2);
}

#[tokio::test]
async fn test_rename_copy_failure_leaves_source() {
    let dir = tempdir().unwrap();
    let (drive, flaky) = flaky_drive_in(&dir).await;
    let org = org("ORG123");

    drive
        .upload(&org, None, file("invoice.pdf", b"pdf"))
        .await
        .unwrap();

    flaky.fail_copy.store(true, Ordering::SeqCst);
    let err = drive
        .rename(&org, "invoice.pdf", "invoice-2023.pdf")
        .await
        .unwrap_err();
    assert!(
        matches!(err, DriveError::CopyFailed(_)),
        "expected CopyFailed, got {:?}",
        err
    );

    let entries = drive.list(&org, None).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["invoice.pdf"], "source unchanged, no destination");
}

#[tokio::test]
async fn test_rename_delete_failure_reports_incomplete() {
    let dir = tempdir().unwrap();
    let (drive, flaky) = flaky_drive_in(&dir).await;
    let org = org("ORG123");

    drive
        .upload(&org, None, file("invoice.pdf", b"pdf"))
        .await
        .unwrap();

    flaky.fail_delete.store(true, Ordering::SeqCst);
    let err = drive
        .rename(&org, "invoice.pdf", "invoice-2023.pdf")
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Rename incomplete: \"ORG123/invoice.pdf\" was copied to \
         \"ORG123/invoice-2023.pdf\" but the original could not be removed: \
         Delete failed: injected delete failure"
    );
    match err {
        DriveError::RenameIncomplete {
            ref source_key,
            ref destination_key,
            ..
        } => {
            assert_eq!(source_key, "ORG123/invoice.pdf");
            assert_eq!(destination_key, "ORG123/invoice-2023.pdf");
        }
        other => panic!("expected RenameIncomplete, got {:?}", other),
    }

    // Both objects remain until the caller repairs.
    let entries = drive.list(&org, None).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["invoice-2023.pdf", "invoice.pdf"]);

    // Retrying just the removal completes the rename.
    flaky.fail_delete.store(false, Ordering::SeqCst);
    drive.delete(&org, "invoice.pdf").await.expect("repair delete");
    let entries = drive.list(&org, None).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["invoice-2023.pdf"]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    for name in ["invoice.pdf", "receipt.pdf", "Invoice2.pdf"] {
        drive.upload(&org, None, file(name, b"x")).await.unwrap();
    }

    let found = drive.search(&org, "inv").await.unwrap();
    let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Invoice2.pdf", "invoice.pdf"]);

    let found = drive.search(&org, "zzz").await.unwrap();
    assert!(found.is_empty());

    // Folder rows match by display name too.
    drive.create_folder(&org, "Invoices").await.unwrap();
    let found = drive.search(&org, "INV").await.unwrap();
    assert_eq!(found.len(), 3);
}

#[tokio::test]
async fn test_public_url() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    drive
        .upload(&org, Some("docs"), file("invoice.pdf", b"pdf"))
        .await
        .unwrap();

    let url = drive.public_url(&org, "docs/invoice.pdf").await.expect("url");
    assert_eq!(url, "http://localhost:3000/files/ORG123/docs/invoice.pdf");

    let err = drive.public_url(&org, "docs/missing.pdf").await.unwrap_err();
    assert!(
        matches!(err, DriveError::NoPublicUrl(ref key) if key == "ORG123/docs/missing.pdf"),
        "expected NoPublicUrl, got {:?}",
        err
    );
}

#[tokio::test]
async fn test_delete_semantics() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    // Deleting an absent object is not an error.
    drive.delete(&org, "never-was.txt").await.expect("noop delete");

    // The organization root is not a deletable object.
    let err = drive.delete(&org, "").await.unwrap_err();
    assert!(matches!(err, DriveError::InvalidPath(_)));
}

#[tokio::test]
async fn test_traversal_and_bad_names_rejected() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;
    let org = org("ORG123");

    let err = drive
        .upload(&org, Some("../OTHER"), file("x.txt", b"x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DriveError::InvalidPath(_)));

    let err = drive
        .upload(&org, None, file("a/b.txt", b"x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DriveError::InvalidPath(_)));

    let err = drive.list(&org, Some("..")).await.unwrap_err();
    assert!(matches!(err, DriveError::InvalidPath(_)));

    let err = drive.delete(&org, "a/../b").await.unwrap_err();
    assert!(matches!(err, DriveError::InvalidPath(_)));

    let err = drive.rename(&org, "a.txt", "..").await.unwrap_err();
    assert!(matches!(err, DriveError::InvalidPath(_)));
}

#[tokio::test]
async fn test_unresolved_org_rejected() {
    let dir = tempdir().unwrap();
    let drive = drive_in(&dir).await;

    let err = drive
        .upload(&OrgId::new(""), None, file("x.txt", b"x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DriveError::TenantResolution));

    let err = drive.list(&OrgId::new("   "), None).await.unwrap_err();
    assert!(matches!(err, DriveError::TenantResolution));
}
