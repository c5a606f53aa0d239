//! Core data types for the Anigen storyboard wizard.
//!
//! This crate provides the records that flow between wizard steps and the
//! durable store: the parsed script tree, the side maps the user edits, BGM
//! settings, audio records, and the named slots they persist under.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod bgm;
mod data_uri;
mod maps;
mod script;
mod slot;
mod step;
mod video;
mod voice;

pub use audio::{AudioClip, AudioKey, AudioRecord, AudioRecords};
pub use bgm::{BgmSettings, DEFAULT_BGM_VOLUME};
pub use data_uri::{DecodedDataUri, decode_data_uri, encode_data_uri};
pub use maps::{BackgroundImageMap, CharacterImageMap, VoiceMap};
pub use script::{
    LinePosition, ParseFailure, ParsedScript, Scene, SceneId, StoryboardLine, Storyboard, SubScene,
};
pub use slot::Slot;
pub use step::WizardStep;
pub use video::VideoReference;
pub use voice::{Gender, VOICE_CATALOG, VoiceInfo, find_voice};
