//! Error handling for chartmark
//!
//! Provides the point error raised when a persisted anchor is malformed.
//! Decoding and file errors belong to the crates that do the I/O.
//! It is never surfaced by interactive operations; pointer events that
//! cannot be resolved are dropped rather than reported.

use thiserror::Error;

/// Point error type
///
/// Raised when a persisted point cannot be turned into a [`crate::ChartPoint`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointError {
    /// Neither a time nor a logical index was present
    #[error("Point has neither a time nor a logical index")]
    MissingHorizontalAnchor,

    /// Price was NaN or infinite
    #[error("Point price must be finite, got {price}")]
    NonFinitePrice {
        /// The rejected price value.
        price: f64,
    },

    /// Logical index was NaN or infinite
    #[error("Point logical index must be finite, got {logical}")]
    NonFiniteLogical {
        /// The rejected logical index.
        logical: f64,
    },
}
