//! Tests for size-checked uploads.

use anigen_error::{AnigenErrorKind, UploadErrorKind};
use anigen_workflow::{UploadKind, UploadPolicy, read_upload};
use tempfile::TempDir;

fn upload_kind(err: &anigen_error::AnigenError) -> Option<UploadErrorKind> {
    match err.kind() {
        AnigenErrorKind::Upload(e) => Some(e.kind.clone()),
        _ => None,
    }
}

fn tight_policy() -> UploadPolicy {
    UploadPolicy {
        max_image_bytes: 16,
        max_bgm_bytes: 32,
    }
}

#[tokio::test]
async fn test_upload_at_limit_is_encoded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aki.png");
    std::fs::write(&path, [7u8; 16]).unwrap();

    let upload = read_upload(&path, UploadKind::Image, &tight_policy())
        .await
        .unwrap();
    assert_eq!(upload.file_name, "aki.png");
    assert_eq!(upload.size, 16);
    assert!(upload.data_uri.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_upload_over_limit_and_wrong_type() {
    let dir = TempDir::new().unwrap();
    let big = dir.path().join("rooftop.jpg");
    std::fs::write(&big, [0u8; 17]).unwrap();
    let err = read_upload(&big, UploadKind::Image, &tight_policy())
        .await
        .unwrap_err();
    assert!(matches!(
        upload_kind(&err),
        Some(UploadErrorKind::TooLarge { size: 17, limit: 16, .. })
    ));

    let track = dir.path().join("theme.png");
    std::fs::write(&track, [0u8; 4]).unwrap();
    let err = read_upload(&track, UploadKind::Bgm, &tight_policy())
        .await
        .unwrap_err();
    assert!(matches!(
        upload_kind(&err),
        Some(UploadErrorKind::UnsupportedType { .. })
    ));
}

// Files under /proc report a length of zero but read back real content.
#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_content_past_limit_rejected_when_metadata_understates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("status.png");
    std::os::unix::fs::symlink("/proc/self/status", &path).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);

    let err = read_upload(&path, UploadKind::Image, &tight_policy())
        .await
        .unwrap_err();
    assert!(matches!(
        upload_kind(&err),
        Some(UploadErrorKind::TooLarge { size: 17, limit: 16, .. })
    ));
}
