use thiserror::Error;

/// Errors surfaced by the NoteHub client.
///
/// Every variant owns plain strings so the error can be cloned into cache
/// entries and shared between callers waiting on the same request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotehubError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Not authorized ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for NotehubError {
    fn from(e: std::io::Error) -> Self {
        NotehubError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for NotehubError {
    fn from(e: serde_json::Error) -> Self {
        NotehubError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NotehubError>;
