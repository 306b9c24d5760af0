use thiserror::Error;

/// Errors produced while parsing hands, mutating sessions, validating
/// configuration or touching storage.
///
/// None of the statistics in `analysis` return this. They are total over
/// their inputs and report thin samples as a classification instead.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid starting hand notation: {0}")]
    InvalidHandNotation(String),

    #[error("No session with id {0}")]
    UnknownSession(String),

    #[error("No hand with id {hand_id} in session {session_id}")]
    UnknownHand {
        session_id: String,
        hand_id: String,
    },

    #[error("Invalid analyzer configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidStorageKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for fallible tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
