//! Upload rejection types.

/// Reasons an uploaded file is refused before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum UploadErrorKind {
    /// File exceeds the size limit for its kind
    #[display(
        "File size too large: {} is {} bytes, limit is {} bytes",
        file_name,
        size,
        limit
    )]
    TooLarge {
        /// Name of the rejected file
        file_name: String,
        /// Size in bytes, counted up to one past the limit
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },
    /// File extension does not match an accepted media type
    #[display("Unsupported file type for {}: {}", expected, file_name)]
    UnsupportedType {
        /// Name of the rejected file
        file_name: String,
        /// Media family that was expected (image, audio)
        expected: String,
    },
    /// File could not be read
    #[display("Failed to read upload: {}", _0)]
    Read(String),
}

/// Upload error with location tracking.
///
/// # Examples
///
/// ```
/// use anigen_error::{UploadError, UploadErrorKind};
///
/// let err = UploadError::new(UploadErrorKind::TooLarge {
///     file_name: "castle.png".to_string(),
///     size: 6 * 1024 * 1024,
///     limit: 5 * 1024 * 1024,
/// });
/// assert!(err.is_too_large());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upload Error: {} at line {} in {}", kind, line, file)]
pub struct UploadError {
    /// The kind of error that occurred
    pub kind: UploadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UploadError {
    /// Create a new upload error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UploadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the upload was refused for its size.
    pub fn is_too_large(&self) -> bool {
        matches!(self.kind, UploadErrorKind::TooLarge { .. })
    }
}
