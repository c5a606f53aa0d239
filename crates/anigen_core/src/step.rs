//! Wizard steps.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// The five wizard steps, strictly linear.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum WizardStep {
    /// Enter and parse the script
    #[default]
    ScriptEntry,
    /// Pick character and background images
    PickerAssignment,
    /// Pick voices and background music
    VoiceBgmSelection,
    /// Synthesize speech
    SpeechGeneration,
    /// Render and export the video
    VideoExport,
}

impl WizardStep {
    /// Zero-based position.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Step at a zero-based position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Heading shown for the step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ScriptEntry => "Script/Scene Parser",
            Self::PickerAssignment => "Background & Character Picker",
            Self::VoiceBgmSelection => "Voice & BGM Picker",
            Self::SpeechGeneration => "TTS Generation",
            Self::VideoExport => "Video Preview & Export",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_order() {
        assert_eq!(WizardStep::ScriptEntry.next(), Some(WizardStep::PickerAssignment));
        assert_eq!(WizardStep::VideoExport.next(), None);
        assert_eq!(WizardStep::from_index(3), Some(WizardStep::SpeechGeneration));
        assert_eq!(WizardStep::from_index(5), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "voice-bgm-selection".parse::<WizardStep>().unwrap(),
            WizardStep::VoiceBgmSelection
        );
        assert_eq!("Video-Export".parse::<WizardStep>().unwrap(), WizardStep::VideoExport);
    }
}
