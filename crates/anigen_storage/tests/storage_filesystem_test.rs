//! Tests for the file-system slot store.

use anigen_core::BgmSettings;
use anigen_error::{AnigenErrorKind, StorageErrorKind};
use anigen_storage::{
    DurableStore, FileSystemStore, MANIFEST_FILE, RECORD_DIR, SCHEMA_VERSION, open_or_in_memory,
};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_write_and_read() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();

    store
        .write("script", &json!("Aki: It's late."))
        .await
        .unwrap();

    let value = store.read("script").await.unwrap();
    assert_eq!(value, Some(json!("Aki: It's late.")));
    assert!(store.is_persistent());
}

#[tokio::test]
async fn test_missing_key_reads_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();

    assert_eq!(store.read("parsed").await.unwrap(), None);
    // Deleting a missing key is not an error
    store.delete("parsed").await.unwrap();
}

#[tokio::test]
async fn test_bgm_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let bgm = BgmSettings {
        file_name: "bgm.mp3".to_string(),
        file_data: "data:audio/mp3;base64,AA==".to_string(),
        volume: 0.5,
    };

    {
        let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
            .await
            .unwrap();
        store
            .write("bgm_settings", &serde_json::to_value(&bgm).unwrap())
            .await
            .unwrap();
    }

    // Reopen to read from disk
    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();
    let value = store.read("bgm_settings").await.unwrap().unwrap();
    assert_eq!(value["fileName"], "bgm.mp3");

    let restored: BgmSettings = serde_json::from_value(value).unwrap();
    assert_eq!(restored, bgm);
}

#[tokio::test]
async fn test_record_layout() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();
    store.write("voice_settings", &json!({"Aki": "en-US-AriaNeural"})).await.unwrap();

    let manifest: serde_json::Value = serde_json::from_slice(
        &std::fs::read(temp_dir.path().join(MANIFEST_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["schema_version"], SCHEMA_VERSION);

    let record: serde_json::Value = serde_json::from_slice(
        &std::fs::read(temp_dir.path().join(RECORD_DIR).join("voice_settings.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(record["key"], "voice_settings");
    assert_eq!(record["data"]["Aki"], "en-US-AriaNeural");
}

#[tokio::test]
async fn test_schema_bump_wipes_slots() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = FileSystemStore::open(temp_dir.path(), 3).await.unwrap();
        store.write("script", &json!("old")).await.unwrap();
        store.write("audio_files", &json!({})).await.unwrap();
    }

    let store = FileSystemStore::open(temp_dir.path(), 4).await.unwrap();
    assert_eq!(store.read("script").await.unwrap(), None);
    assert_eq!(store.read("audio_files").await.unwrap(), None);

    // The new version sticks
    drop(store);
    let store = FileSystemStore::open(temp_dir.path(), 4).await.unwrap();
    store.write("script", &json!("new")).await.unwrap();
    drop(store);
    let store = FileSystemStore::open(temp_dir.path(), 4).await.unwrap();
    assert_eq!(store.read("script").await.unwrap(), Some(json!("new")));
}

#[tokio::test]
async fn test_missing_manifest_wipes_slots() {
    let temp_dir = TempDir::new().unwrap();
    let records = temp_dir.path().join(RECORD_DIR);
    std::fs::create_dir_all(&records).unwrap();
    std::fs::write(
        records.join("script.json"),
        br#"{"key":"script","data":"stale"}"#,
    )
    .unwrap();

    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();
    assert_eq!(store.read("script").await.unwrap(), None);
}

#[tokio::test]
async fn test_downgrade_refused() {
    let temp_dir = TempDir::new().unwrap();
    FileSystemStore::open(temp_dir.path(), 5).await.unwrap();

    let err = FileSystemStore::open(temp_dir.path(), 3).await.unwrap_err();
    match err.kind() {
        AnigenErrorKind::Storage(e) => assert!(e.is_unavailable()),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_unreadable_manifest_fails_open() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join(MANIFEST_FILE)).unwrap();

    let err = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap_err();
    match err.kind() {
        AnigenErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::FileRead(_)));
            assert!(e.is_unavailable());
        }
        other => panic!("unexpected error: {}", other),
    }

    let store = open_or_in_memory(temp_dir.path(), SCHEMA_VERSION).await;
    assert!(!store.is_persistent());
}

#[tokio::test]
async fn test_corrupt_record_reads_none() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();

    std::fs::write(
        temp_dir.path().join(RECORD_DIR).join("parsed.json"),
        b"{ not json",
    )
    .unwrap();

    assert_eq!(store.read("parsed").await.unwrap(), None);
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSystemStore::open(temp_dir.path(), SCHEMA_VERSION)
        .await
        .unwrap();
    store.write("script", &json!("a")).await.unwrap();
    store.write("video_file", &json!("/out/video.mp4")).await.unwrap();

    store.clear().await.unwrap();

    assert_eq!(store.read("script").await.unwrap(), None);
    assert_eq!(store.read("video_file").await.unwrap(), None);
    store.write("script", &json!("b")).await.unwrap();
    assert_eq!(store.read("script").await.unwrap(), Some(json!("b")));
}

#[tokio::test]
async fn test_unavailable_directory_falls_back_to_memory() {
    let temp_dir = TempDir::new().unwrap();
    // A regular file where the directory should be
    let blocker = temp_dir.path().join("session");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let store = open_or_in_memory(&blocker, SCHEMA_VERSION).await;
    assert!(!store.is_persistent());

    store.write("script", &json!("kept in memory")).await.unwrap();
    assert_eq!(
        store.read("script").await.unwrap(),
        Some(json!("kept in memory"))
    );
}
