//! Named slots of the persisted key/value table.

/// One named entry in the durable store.
///
/// Each slot holds the JSON form of one entity and has its own lifecycle.
///
/// # Examples
///
/// ```
/// use anigen_core::Slot;
///
/// assert_eq!(Slot::CharacterImages.key(), "character_images");
/// assert_eq!("bgm_settings".parse::<Slot>().unwrap(), Slot::BgmSettings);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Slot {
    /// Raw script text
    Script,
    /// Parsed script, enriched by reconciliation
    Parsed,
    /// Character image map
    CharacterImages,
    /// Background image map
    BackgroundImages,
    /// Character voice map
    VoiceSettings,
    /// BGM track
    BgmSettings,
    /// Audio records
    AudioFiles,
    /// Rendered video reference
    VideoFile,
    /// Current wizard step
    WizardStep,
}

impl Slot {
    /// Key used in the store.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Script => "script",
            Slot::Parsed => "parsed",
            Slot::CharacterImages => "character_images",
            Slot::BackgroundImages => "background_images",
            Slot::VoiceSettings => "voice_settings",
            Slot::BgmSettings => "bgm_settings",
            Slot::AudioFiles => "audio_files",
            Slot::VideoFile => "video_file",
            Slot::WizardStep => "wizard_step",
        }
    }

    /// Slots invalidated when the script text changes.
    pub fn downstream_of_script() -> [Slot; 7] {
        [
            Slot::Parsed,
            Slot::CharacterImages,
            Slot::BackgroundImages,
            Slot::VoiceSettings,
            Slot::BgmSettings,
            Slot::AudioFiles,
            Slot::VideoFile,
        ]
    }
}
