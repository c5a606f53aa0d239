//! Background music settings.

use serde::{Deserialize, Serialize};

/// Volume a freshly uploaded track starts at.
pub const DEFAULT_BGM_VOLUME: f32 = 0.5;

/// The single BGM track for the video.
///
/// Stored with the original field names (`fileName`, `fileData`).
///
/// # Examples
///
/// ```
/// use anigen_core::BgmSettings;
///
/// let bgm = BgmSettings::new("theme.mp3", "data:audio/mp3;base64,AA==").with_volume(1.7);
/// assert_eq!(bgm.volume, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgmSettings {
    /// Original file name
    pub file_name: String,
    /// Track as a data URI
    pub file_data: String,
    /// Playback volume in `0.0..=1.0`
    pub volume: f32,
}

impl BgmSettings {
    /// Settings for a new upload at the default volume.
    pub fn new(file_name: impl Into<String>, file_data: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_data: file_data.into(),
            volume: DEFAULT_BGM_VOLUME,
        }
    }

    /// Same track at another volume, clamped to `0.0..=1.0`.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = if volume.is_nan() {
            DEFAULT_BGM_VOLUME
        } else {
            volume.clamp(0.0, 1.0)
        };
        self
    }
}
