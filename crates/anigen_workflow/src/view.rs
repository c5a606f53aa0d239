//! Per-step slices of session state.

use anigen_core::{
    AudioKey, AudioRecord, AudioRecords, BackgroundImageMap, BgmSettings, CharacterImageMap,
    ParsedScript, Storyboard, VideoReference, VoiceMap, WizardStep,
};

/// State needed to present one wizard step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepView {
    /// Script text entry
    ScriptEntry {
        /// Current script text
        script: String,
    },
    /// Image assignment for scenes and characters
    PickerAssignment {
        /// Scenes in order
        scenes: Vec<SceneSummary>,
        /// Unique characters in first-appearance order
        characters: Vec<String>,
        /// Assigned character images
        character_images: CharacterImageMap,
        /// Assigned backgrounds
        background_images: BackgroundImageMap,
    },
    /// Voice and background music selection
    VoiceBgmSelection {
        /// Every character with its voice
        characters: Vec<CharacterVoice>,
        /// Characters with a voice
        selected: usize,
        /// All characters
        total: usize,
        /// Background music, if set
        bgm: Option<BgmSettings>,
    },
    /// Speech synthesis progress
    SpeechGeneration {
        /// Every speakable line with its audio status
        lines: Vec<LineStatus>,
    },
    /// Render readiness and the stored video
    VideoExport(ExportSummary),
    /// The parser answered with an error
    ParseError {
        /// Step being shown
        step: WizardStep,
        /// Parser's message
        message: String,
    },
    /// Prerequisites of the step are missing
    Placeholder {
        /// Step being shown
        step: WizardStep,
        /// What to do first
        message: String,
    },
}

/// One scene in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    /// Key in the background map
    pub key: String,
    /// Scene description
    pub description: String,
    /// Number of lines in the scene
    pub line_count: usize,
}

/// A character and its voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterVoice {
    /// Character name
    pub name: String,
    /// Assigned voice short name
    pub voice: Option<String>,
}

/// Audio state of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioStatus {
    /// The character has no voice
    NoVoice,
    /// Not generated yet
    Missing,
    /// Request in flight
    Generating,
    /// Audio available
    Ready,
    /// Last attempt failed
    Failed(String),
}

/// One line in the speech step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStatus {
    /// Audio record key, used to address the line
    pub key: AudioKey,
    /// Speaking character
    pub character: String,
    /// Expression hint
    pub expression: String,
    /// Spoken text
    pub text: String,
    /// Assigned voice
    pub voice: Option<String>,
    /// Audio state
    pub status: AudioStatus,
}

/// Export readiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Finished audio records without error
    pub available_audio: usize,
    /// Lines with text and speaker
    pub expected_audio: usize,
    /// At least one character image assigned
    pub has_character_images: bool,
    /// At least one background assigned
    pub has_background_images: bool,
    /// Stored video, if any
    pub video: Option<VideoReference>,
}

impl ExportSummary {
    /// Whether every piece the render needs is present.
    pub fn is_ready(&self) -> bool {
        self.available_audio > 0 && self.has_character_images && self.has_background_images
    }
}

const NO_PARSED_SCRIPT: &str =
    "No parsed script data found. Please go back to the Script Parser and parse your script first.";
const NO_SCENES: &str = "No scenes found in parsed data.";
const NO_CHARACTERS: &str = "No characters found in the parsed data.";

/// Everything the views read, borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewInputs<'a> {
    pub(crate) script: &'a str,
    pub(crate) parsed: Option<&'a ParsedScript>,
    pub(crate) character_images: &'a CharacterImageMap,
    pub(crate) background_images: &'a BackgroundImageMap,
    pub(crate) voices: &'a VoiceMap,
    pub(crate) bgm: Option<&'a BgmSettings>,
    pub(crate) audio: &'a AudioRecords,
    pub(crate) video: Option<&'a VideoReference>,
}

impl StepView {
    pub(crate) fn build(step: WizardStep, inputs: &ViewInputs<'_>) -> Self {
        match step {
            WizardStep::ScriptEntry => StepView::ScriptEntry {
                script: inputs.script.to_string(),
            },
            WizardStep::PickerAssignment => with_storyboard(step, inputs, picker),
            WizardStep::VoiceBgmSelection => with_storyboard(step, inputs, voices),
            WizardStep::SpeechGeneration => with_storyboard(step, inputs, speech),
            WizardStep::VideoExport => with_storyboard(step, inputs, |storyboard, inputs| {
                StepView::VideoExport(export_summary(storyboard, inputs))
            }),
        }
    }
}

fn with_storyboard(
    step: WizardStep,
    inputs: &ViewInputs<'_>,
    render: impl FnOnce(&Storyboard, &ViewInputs<'_>) -> StepView,
) -> StepView {
    let Some(parsed) = inputs.parsed else {
        return placeholder(step, NO_PARSED_SCRIPT);
    };
    if let Some(message) = parsed.error() {
        return StepView::ParseError {
            step,
            message: message.to_string(),
        };
    }
    match parsed.storyboard().filter(|s| !s.scenes.is_empty()) {
        Some(storyboard) => render(storyboard, inputs),
        None => placeholder(step, NO_SCENES),
    }
}

fn placeholder(step: WizardStep, message: &str) -> StepView {
    StepView::Placeholder {
        step,
        message: message.to_string(),
    }
}

fn picker(storyboard: &Storyboard, inputs: &ViewInputs<'_>) -> StepView {
    let scenes = storyboard
        .scenes
        .iter()
        .enumerate()
        .map(|(idx, scene)| SceneSummary {
            key: Storyboard::scene_key(idx, scene),
            description: scene.scene_desc.clone(),
            line_count: scene.sub_scenes.iter().map(|s| s.storyboards.len()).sum(),
        })
        .collect();

    StepView::PickerAssignment {
        scenes,
        characters: storyboard.unique_characters(),
        character_images: inputs.character_images.clone(),
        background_images: inputs.background_images.clone(),
    }
}

fn voices(storyboard: &Storyboard, inputs: &ViewInputs<'_>) -> StepView {
    let names = storyboard.unique_characters();
    if names.is_empty() {
        return placeholder(WizardStep::VoiceBgmSelection, NO_CHARACTERS);
    }

    let characters: Vec<CharacterVoice> = names
        .into_iter()
        .map(|name| CharacterVoice {
            voice: inputs.voices.get(&name).cloned(),
            name,
        })
        .collect();
    let selected = characters.iter().filter(|c| c.voice.is_some()).count();

    StepView::VoiceBgmSelection {
        total: characters.len(),
        selected,
        characters,
        bgm: inputs.bgm.cloned(),
    }
}

fn speech(storyboard: &Storyboard, inputs: &ViewInputs<'_>) -> StepView {
    let lines = storyboard
        .lines()
        .filter(|(_, line)| line.is_speakable())
        .map(|(position, line)| {
            let key = line.audio_key(position);
            let voice = inputs.voices.get(&line.character).cloned();
            let status = match (inputs.audio.get(&key), &voice) {
                (Some(record), _) if record.is_generating => AudioStatus::Generating,
                (Some(record), _) if record.error.is_some() => {
                    AudioStatus::Failed(record.error.clone().unwrap_or_default())
                }
                (Some(record), _) if record.audio_data.is_some() => AudioStatus::Ready,
                (_, None) => AudioStatus::NoVoice,
                _ => AudioStatus::Missing,
            };
            LineStatus {
                key,
                character: line.character.clone(),
                expression: line.expression.clone(),
                text: line.line.clone(),
                voice,
                status,
            }
        })
        .collect();

    StepView::SpeechGeneration { lines }
}

fn export_summary(storyboard: &Storyboard, inputs: &ViewInputs<'_>) -> ExportSummary {
    ExportSummary {
        available_audio: storyboard
            .lines()
            .filter(|(position, line)| {
                inputs
                    .audio
                    .get(&line.audio_key(*position))
                    .is_some_and(AudioRecord::is_ready)
            })
            .count(),
        expected_audio: storyboard.speakable_line_count(),
        has_character_images: !inputs.character_images.is_empty(),
        has_background_images: !inputs.background_images.is_empty(),
        video: inputs.video.cloned(),
    }
}
