//! Error types for decoding persisted drawings.

use thiserror::Error;

/// Errors raised while turning persisted records back into drawings.
///
/// Only [`DrawingError::Json`] for a whole document escapes a load; the
/// per-record variants are logged and the record is skipped.
#[derive(Error, Debug)]
pub enum DrawingError {
    /// The record's `type` tag is not a known drawing kind.
    #[error("Unknown drawing type '{0}'")]
    UnknownKind(String),

    /// The record does not carry the number of points its kind needs.
    #[error("{kind} expects {expected} point(s), found {found}")]
    PointCount {
        kind: String,
        expected: usize,
        found: usize,
    },

    /// The record's options could not be decoded for its kind.
    #[error("Invalid options for {kind}: {source}")]
    InvalidOptions {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for drawing persistence.
pub type DrawingResult<T> = Result<T, DrawingError>;
