//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write record
    #[display("Failed to write record: {}", _0)]
    FileWrite(String),
    /// Failed to read the store manifest
    #[display("Failed to read manifest: {}", _0)]
    FileRead(String),
    /// Record could not be encoded or decoded
    #[display("Corrupt record '{}': {}", key, message)]
    Corrupt {
        /// Slot key of the record
        key: String,
        /// Decoder message
        message: String,
    },
    /// Stored schema is newer than the one requested
    #[display("Stored schema version {} is newer than supported version {}", stored, requested)]
    SchemaDowngrade {
        /// Version found in the manifest
        stored: u32,
        /// Version the caller asked for
        requested: u32,
    },
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use anigen_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Unavailable("read-only filesystem".to_string()));
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the store could not be opened at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self.kind,
            StorageErrorKind::Unavailable(_)
                | StorageErrorKind::DirectoryCreation(_)
                | StorageErrorKind::FileRead(_)
                | StorageErrorKind::SchemaDowngrade { .. }
        )
    }
}
