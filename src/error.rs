use thiserror::Error;

/// Coarse failure classes surfaced at the request boundary.
///
/// Every concrete error type in the crate reports one of these through a
/// `kind()` method, which the HTTP layer uses to choose a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied something unusable; rejected before any side effect.
    InvalidInput,

    /// The language-model service failed or returned nothing usable.
    UpstreamFailure,

    /// A filesystem or persistence write failed.
    IoFailure,
}

impl ErrorKind {
    /// Stable snake_case identifier used in JSON error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::UpstreamFailure => "upstream_failure",
            ErrorKind::IoFailure => "io_failure",
        }
    }
}

/// Errors returned by a language-model capability.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// The service rejected the configured credential
    #[error("The provided API key is invalid: {0}")]
    InvalidCredentials(String),

    /// The configured model identifier is unknown or not accessible
    #[error("The model '{model}' is not available: {message}")]
    UnsupportedModel { model: String, message: String },

    /// Network or connection error
    #[error("Language model service unreachable: {0}")]
    Unreachable(String),

    /// Any other non-success response from the service
    #[error("Language model request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Malformed language model response: {0}")]
    MalformedResponse(String),

    /// The service answered but produced no text
    #[error("Empty response from language model service")]
    EmptyResponse,
}

/// Errors raised while rendering or writing a deck.
#[derive(Debug, Clone, Error)]
pub enum DeckError {
    /// A deck with no slides can only come from bypassing the compiler
    #[error("Cannot serialize an empty deck")]
    EmptyDeck,

    /// The requested output name is not a plain file name
    #[error("Invalid file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    /// Building the zip package failed
    #[error("Failed to encode presentation package: {0}")]
    Package(String),

    /// Filesystem error while creating the directory or writing the file
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },
}

impl DeckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeckError::EmptyDeck | DeckError::InvalidFileName { .. } => ErrorKind::InvalidInput,
            DeckError::Package(_) | DeckError::Io { .. } => ErrorKind::IoFailure,
        }
    }
}

impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::Package(err.to_string())
    }
}

impl From<std::fmt::Error> for DeckError {
    fn from(err: std::fmt::Error) -> Self {
        DeckError::Package(err.to_string())
    }
}

/// Errors raised by a history store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Reading or appending to the backing file failed
    #[error("History store I/O error: {0}")]
    Io(String),

    /// A record could not be encoded
    #[error("History record serialization failed: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Errors from the generation pipeline.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// Missing prompt, malformed generation result, and similar caller errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The language model call failed
    #[error("Upstream failure: {0}")]
    Upstream(#[from] LlmError),

    /// Rendering or writing the presentation failed
    #[error("Presentation error: {0}")]
    Deck(#[from] DeckError),

    /// Persisting or reading history failed
    #[error("History error: {0}")]
    Store(#[from] StoreError),
}

impl GenerateError {
    /// Shorthand for an [`GenerateError::InvalidInput`] with the given message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        GenerateError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::InvalidInput { .. } => ErrorKind::InvalidInput,
            GenerateError::Upstream(_) => ErrorKind::UpstreamFailure,
            GenerateError::Deck(err) => err.kind(),
            GenerateError::Store(_) => ErrorKind::IoFailure,
        }
    }
}
