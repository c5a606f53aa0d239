//! Tests for typed slot repositories.

use anigen_core::{CharacterImageMap, Slot, VoiceMap};
use anigen_storage::{
    DurableStore, InMemoryStore, SlotChange, SlotChangeKind, SlotRepository,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::broadcast;

#[tokio::test]
async fn test_set_get_delete() {
    let store = Arc::new(InMemoryStore::new());
    let (changes, _) = broadcast::channel(16);
    let repo = SlotRepository::<VoiceMap>::new(store.clone(), Slot::VoiceSettings, changes);

    assert_eq!(repo.get().await.unwrap(), None);

    let mut voices = VoiceMap::new();
    voices.insert("Aki".to_string(), "zh-HK-HiuGaaiNeural".to_string());
    repo.set(&voices).await.unwrap();
    assert_eq!(repo.get().await.unwrap(), Some(voices));
    assert_eq!(store.len().await, 1);

    repo.delete().await.unwrap();
    assert_eq!(repo.get().await.unwrap(), None);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_changes_shared_across_repositories() {
    let store: Arc<dyn DurableStore> = Arc::new(InMemoryStore::new());
    let (changes, mut receiver) = broadcast::channel(16);
    let voices = SlotRepository::<VoiceMap>::new(store.clone(), Slot::VoiceSettings, changes.clone());
    let images =
        SlotRepository::<CharacterImageMap>::new(store, Slot::CharacterImages, changes);

    voices.set(&VoiceMap::new()).await.unwrap();
    images.delete().await.unwrap();

    assert_eq!(
        receiver.recv().await.unwrap(),
        SlotChange {
            slot: Slot::VoiceSettings,
            kind: SlotChangeKind::Set
        }
    );
    assert_eq!(
        receiver.recv().await.unwrap(),
        SlotChange {
            slot: Slot::CharacterImages,
            kind: SlotChangeKind::Deleted
        }
    );
}

#[tokio::test]
async fn test_unexpected_shape_reads_none() {
    let store = Arc::new(InMemoryStore::new());
    store
        .write(Slot::VoiceSettings.key(), &json!(["not", "a", "map"]))
        .await
        .unwrap();

    let (changes, _) = broadcast::channel(16);
    let repo = SlotRepository::<VoiceMap>::new(store, Slot::VoiceSettings, changes);
    assert_eq!(repo.get().await.unwrap(), None);
}
