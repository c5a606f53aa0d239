//! Top-level error wrapper types.

use crate::{
    ConfigError, ExportError, JsonError, ServiceError, StorageError, UploadError, WizardError,
};

/// Every error condition the wizard can surface.
///
/// # Examples
///
/// ```
/// use anigen_error::{AnigenError, ExportError, ExportErrorKind};
///
/// let err: AnigenError = ExportError::new(ExportErrorKind::NoAudioAvailable).into();
/// assert!(format!("{}", err).contains("No audio files available"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AnigenErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Durable store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Rejected upload
    #[from(UploadError)]
    Upload(UploadError),
    /// Remote service call failed
    #[from(ServiceError)]
    Service(ServiceError),
    /// Export precondition or renderer failure
    #[from(ExportError)]
    Export(ExportError),
    /// Invalid wizard action
    #[from(WizardError)]
    Wizard(WizardError),
}

/// Anigen error with kind discrimination.
///
/// # Examples
///
/// ```
/// use anigen_error::{AnigenError, AnigenResult, ConfigError};
///
/// fn might_fail() -> AnigenResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Anigen Error: {}", _0)]
pub struct AnigenError(Box<AnigenErrorKind>);

impl AnigenError {
    /// Create a new error from a kind.
    pub fn new(kind: AnigenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AnigenErrorKind {
        &self.0
    }

    /// Message suitable for showing next to the control that triggered it.
    ///
    /// Drops the location suffix the wrapper types carry in their `Display`.
    pub fn user_message(&self) -> String {
        match self.kind() {
            AnigenErrorKind::Json(e) => e.message.clone(),
            AnigenErrorKind::Config(e) => e.message.clone(),
            AnigenErrorKind::Storage(e) => e.kind.to_string(),
            AnigenErrorKind::Upload(e) => e.kind.to_string(),
            AnigenErrorKind::Service(e) => e.kind.to_string(),
            AnigenErrorKind::Export(e) => e.kind.to_string(),
            AnigenErrorKind::Wizard(e) => e.kind.to_string(),
        }
    }
}

// Generic From implementation for any type that converts to AnigenErrorKind
impl<T> From<T> for AnigenError
where
    T: Into<AnigenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Anigen operations.
///
/// # Examples
///
/// ```
/// use anigen_error::{AnigenResult, JsonError};
///
/// fn decode() -> AnigenResult<String> {
///     Err(JsonError::new("expected value at line 1 column 1"))?
/// }
/// ```
pub type AnigenResult<T> = std::result::Result<T, AnigenError>;
