//! Error types for the tweening engine

use mathart_api_core::ValueError;

/// Errors raised at the engine's input boundaries. Frame computation itself
/// never fails; mismatches there are logged and skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TweenError {
    /// Seed text did not contain one or two blocks of four integers
    #[error("Invalid seed: {reason}")]
    InvalidSeed { reason: String },

    /// A property name was listed in more than one schema category
    #[error("Property listed more than once in schema: {name}")]
    DuplicateProperty { name: String },

    /// Playback or export length must be positive
    #[error("Invalid length: {length}")]
    InvalidLength { length: f64 },

    /// Export frame rate must be positive
    #[error("Invalid frame rate: {fps}")]
    InvalidFrameRate { fps: f64 },

    /// Malformed value input
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Portable data could not be read or written
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        TweenError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for tweening operations
pub type Result<T> = core::result::Result<T, TweenError>;
