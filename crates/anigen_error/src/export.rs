//! Video export error types.

/// Export failures, including preconditions checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExportErrorKind {
    /// No parsed scenes to render
    #[display(
        "No parsed scenes available. Please go back to Script Parser and parse your script first."
    )]
    NoParsedScript,
    /// No successfully synthesized audio to render
    #[display(
        "No audio files available. Please go back to TTS Generation and generate audio files first."
    )]
    NoAudioAvailable,
    /// Renderer answered without a video reference
    #[display("Failed to generate video: {}", _0)]
    Renderer(String),
}

/// Export error with location tracking.
///
/// # Examples
///
/// ```
/// use anigen_error::{ExportError, ExportErrorKind};
///
/// let err = ExportError::new(ExportErrorKind::NoParsedScript);
/// assert_eq!(err.kind, ExportErrorKind::NoParsedScript);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Export Error: {} at line {} in {}", kind, line, file)]
pub struct ExportError {
    /// The kind of error that occurred
    pub kind: ExportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExportError {
    /// Create a new export error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
