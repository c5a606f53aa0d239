//! Side maps the user edits independently of the parsed script.
//!
//! Ordered maps keep the stored JSON and CLI listings stable.

use std::collections::BTreeMap;

/// Character name → image data URI.
pub type CharacterImageMap = BTreeMap<String, String>;

/// Scene key (`scene_id` or index) → background image data URI.
pub type BackgroundImageMap = BTreeMap<String, String>;

/// Character name → voice short name from the catalog.
pub type VoiceMap = BTreeMap<String, String>;
