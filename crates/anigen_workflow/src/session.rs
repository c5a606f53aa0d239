//! One repository per persisted slot, sharing a store and a change feed.

use anigen_core::{
    AudioRecords, BackgroundImageMap, BgmSettings, CharacterImageMap, ParsedScript, Slot,
    VideoReference, VoiceMap, WizardStep,
};
use anigen_error::AnigenResult;
use anigen_storage::{DurableStore, SlotChange, SlotRepository};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::broadcast;

const CHANGE_CAPACITY: usize = 64;

/// Typed access to every slot of a wizard session.
#[derive(Debug, Clone)]
pub struct Session {
    persistent: bool,
    changes: broadcast::Sender<SlotChange>,
    /// Raw script text
    pub script: SlotRepository<String>,
    /// Parsed script
    pub parsed: SlotRepository<ParsedScript>,
    /// Character images
    pub character_images: SlotRepository<CharacterImageMap>,
    /// Background images
    pub background_images: SlotRepository<BackgroundImageMap>,
    /// Character voices
    pub voices: SlotRepository<VoiceMap>,
    /// Background music
    pub bgm: SlotRepository<BgmSettings>,
    /// Audio records
    pub audio: SlotRepository<AudioRecords>,
    /// Rendered video
    pub video: SlotRepository<VideoReference>,
    /// Current step
    pub step: SlotRepository<WizardStep>,
}

impl Session {
    /// Build the repositories over `store`.
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let persistent = store.is_persistent();

        Self {
            persistent,
            script: repository(&store, Slot::Script, &changes),
            parsed: repository(&store, Slot::Parsed, &changes),
            character_images: repository(&store, Slot::CharacterImages, &changes),
            background_images: repository(&store, Slot::BackgroundImages, &changes),
            voices: repository(&store, Slot::VoiceSettings, &changes),
            bgm: repository(&store, Slot::BgmSettings, &changes),
            audio: repository(&store, Slot::AudioFiles, &changes),
            video: repository(&store, Slot::VideoFile, &changes),
            step: repository(&store, Slot::WizardStep, &changes),
            changes,
        }
    }

    /// Whether the session survives a restart.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Receive a notification for every slot mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.changes.subscribe()
    }

    /// Remove every slot derived from the script text.
    #[tracing::instrument(skip(self))]
    pub async fn clear_downstream(&self) -> AnigenResult<()> {
        for slot in Slot::downstream_of_script() {
            self.delete(slot).await?;
        }
        tracing::info!("Cleared all slots derived from the script");
        Ok(())
    }

    /// Remove every slot.
    #[tracing::instrument(skip(self))]
    pub async fn reset(&self) -> AnigenResult<()> {
        self.script.delete().await?;
        self.clear_downstream().await?;
        self.step.delete().await?;
        tracing::info!("Session reset");
        Ok(())
    }

    async fn delete(&self, slot: Slot) -> AnigenResult<()> {
        match slot {
            Slot::Script => self.script.delete().await,
            Slot::Parsed => self.parsed.delete().await,
            Slot::CharacterImages => self.character_images.delete().await,
            Slot::BackgroundImages => self.background_images.delete().await,
            Slot::VoiceSettings => self.voices.delete().await,
            Slot::BgmSettings => self.bgm.delete().await,
            Slot::AudioFiles => self.audio.delete().await,
            Slot::VideoFile => self.video.delete().await,
            Slot::WizardStep => self.step.delete().await,
        }
    }
}

fn repository<T>(
    store: &Arc<dyn DurableStore>,
    slot: Slot,
    changes: &broadcast::Sender<SlotChange>,
) -> SlotRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    SlotRepository::new(Arc::clone(store), slot, changes.clone())
}
