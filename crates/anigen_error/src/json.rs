//! JSON error types.

/// A slot payload or service body that could not be encoded or decoded.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// Decoder message, prefixed with the subject when there is one
    pub message: String,
    /// Slot key or body name the payload belonged to
    pub subject: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            subject: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Wrap a decoder error with the slot key or body it came from.
    ///
    /// # Examples
    ///
    /// A stored `voices` slot holding a list instead of a map:
    ///
    /// ```
    /// use anigen_error::JsonError;
    ///
    /// let decoded = serde_json::from_str::<std::collections::BTreeMap<String, String>>(
    ///     r#"["en-US-AriaNeural"]"#,
    /// );
    /// let err = JsonError::context("voices", decoded.unwrap_err());
    /// assert_eq!(err.subject.as_deref(), Some("voices"));
    /// assert!(err.message.starts_with("voices: invalid type"));
    /// ```
    #[track_caller]
    pub fn context(subject: &str, err: impl std::fmt::Display) -> Self {
        let mut error = Self::new(format!("{}: {}", subject, err));
        error.subject = Some(subject.to_string());
        error
    }
}
