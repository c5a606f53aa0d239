//! Errors from the parser, speech and renderer services.

/// Error kinds for remote service calls.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServiceErrorKind {
    /// Transport failure: connection refused, DNS, reset
    #[display(
        "Network error: could not connect to the {} service ({}). Please make sure it is running.",
        service,
        message
    )]
    Network {
        /// Service name (parser, speech, renderer)
        service: String,
        /// Underlying transport message
        message: String,
    },
    /// Non-success HTTP status
    #[display("HTTP error! status: {}, message: {}", status, message)]
    Status {
        /// Service name
        service: String,
        /// HTTP status code
        status: u16,
        /// Error body message, or "Unknown error"
        message: String,
    },
    /// Response body did not match the expected shape
    #[display("Failed to decode {} response: {}", service, message)]
    Deserialization {
        /// Service name
        service: String,
        /// Decoder message
        message: String,
    },
    /// Speech service answered with something other than audio
    #[display("Response is not audio data (content-type: {})", _0)]
    NotAudio(String),
    /// Speech service answered with zero bytes
    #[display("Received empty audio file")]
    EmptyAudio,
    /// Service answered successfully but reported an error in the body
    #[display("{}", _0)]
    Rejected(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Service Error: {} at line {} in {}", kind, line, file)]
pub struct ServiceError {
    /// The error kind
    pub kind: ServiceErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServiceError {
    /// Create a new ServiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
