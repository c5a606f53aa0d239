//! Configuration error types.

/// Configuration could not be loaded or holds an unusable value.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Dotted key of the offending setting, e.g. `services.parser_url`
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for a setting whose value cannot be used.
    ///
    /// The key is kept so `ANIGEN__SECTION__KEY` overrides can be named in
    /// the message.
    ///
    /// ```
    /// use anigen_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_value("services.speech_url", "'tts:5002' is not an http(s) URL");
    /// assert_eq!(err.key.as_deref(), Some("services.speech_url"));
    /// assert_eq!(
    ///     err.message,
    ///     "Invalid value for 'services.speech_url': 'tts:5002' is not an http(s) URL"
    /// );
    /// ```
    #[track_caller]
    pub fn invalid_value(key: &str, reason: impl std::fmt::Display) -> Self {
        let mut error = Self::new(format!("Invalid value for '{}': {}", key, reason));
        error.key = Some(key.to_string());
        error
    }
}
