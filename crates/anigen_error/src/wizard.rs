//! Wizard action errors.

/// Invalid user actions inside the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum WizardErrorKind {
    /// Script text is empty or whitespace
    #[display("Script is empty")]
    EmptyScript,
    /// Voice is not part of the catalog
    #[display("Unknown voice: {}", _0)]
    UnknownVoice(String),
    /// No storyboard line carries this audio id
    #[display("No storyboard line with id {}", _0)]
    UnknownLine(String),
    /// Step name or index does not exist
    #[display("Unknown step: {}", _0)]
    UnknownStep(String),
    /// Line exists but has no audio to read back
    #[display("No audio data available for {}, please regenerate", _0)]
    NoAudio(String),
    /// Clip could not be written out within the readiness timeout
    #[display("Audio loading timeout for {}", _0)]
    ClipTimeout(String),
    /// Character has no lines in the parsed script
    #[display("No character named {} in the script", _0)]
    UnknownCharacter(String),
    /// No scene has this key
    #[display("No scene with key {}", _0)]
    UnknownScene(String),
    /// Speech requested for a character without a voice
    #[display("Please select a voice for {} first", _0)]
    VoiceNotSelected(String),
    /// Volume change requested without background music
    #[display("No background music selected")]
    NoBgm,
}

/// Wizard error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Wizard Error: {} at line {} in {}", kind, line, file)]
pub struct WizardError {
    /// The kind of error that occurred
    pub kind: WizardErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WizardError {
    /// Create a new wizard error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WizardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
