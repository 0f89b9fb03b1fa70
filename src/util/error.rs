//! Error types for detbox.

use thiserror::Error;

/// Result alias for detbox operations.
pub type DetBoxResult<T> = std::result::Result<T, DetBoxError>;

/// Errors that can occur when validating detector output.
///
/// All variants are raised before any decoding starts; a pipeline run either
/// fails with one of these or produces a complete result list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetBoxError {
    /// The declared tensor shape cannot describe a detector output.
    #[error("tensor shape {channels}x{candidates} cannot describe a detector output")]
    ShapeMismatch {
        /// Declared channel count (geometry channels + class channels).
        channels: usize,
        /// Declared candidate count.
        candidates: usize,
    },
    /// The label table length does not match the tensor's class channels.
    #[error("label table has {labels} entries but the tensor has {classes} class channels")]
    LabelCountMismatch {
        /// Number of labels supplied by the caller.
        labels: usize,
        /// Number of class channels in the tensor.
        classes: usize,
    },
    /// The backing buffer is shorter than the declared shape requires.
    #[error("tensor buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall {
        /// Minimum number of elements required by the declared shape.
        needed: usize,
        /// Number of elements actually provided.
        got: usize,
    },
}
