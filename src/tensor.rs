//! Borrowed views over raw detector output tensors.
//!
//! Inference runtimes hand back a dense `[channels, candidates]` buffer in
//! channel-major order, while decoding wants to walk one candidate at a time.
//! `TensorView` presents the transposed `[candidate][channel]` logical layout
//! without copying: indexing is a single multiply-add into the backing slice.

use crate::geometry::CenterBox;
use crate::util::{DetBoxError, DetBoxResult};

/// Number of geometry channels preceding the class-score channels.
///
/// Channels `0..4` hold `cx, cy, w, h` in model-input pixel units; every
/// remaining channel is one class score.
pub const GEOMETRY_CHANNELS: usize = 4;

/// Borrowed, shape-checked view over a detector output buffer.
///
/// The view only borrows the buffer for the duration of one decode call and
/// never mutates it. Cheap to copy.
#[derive(Clone, Copy, Debug)]
pub struct TensorView<'a> {
    data: &'a [f32],
    channels: usize,
    candidates: usize,
}

impl<'a> TensorView<'a> {
    /// Creates a view with the declared `channels x candidates` shape.
    ///
    /// Fails with [`DetBoxError::ShapeMismatch`] when the shape cannot
    /// describe a detector output (no candidates, or no class channel after
    /// the four geometry channels), and with [`DetBoxError::BufferTooSmall`]
    /// when the buffer holds fewer than `channels * candidates` elements.
    pub fn new(data: &'a [f32], channels: usize, candidates: usize) -> DetBoxResult<Self> {
        if channels <= GEOMETRY_CHANNELS || candidates == 0 {
            return Err(DetBoxError::ShapeMismatch {
                channels,
                candidates,
            });
        }
        let needed = channels
            .checked_mul(candidates)
            .ok_or(DetBoxError::ShapeMismatch {
                channels,
                candidates,
            })?;
        if data.len() < needed {
            return Err(DetBoxError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            channels,
            candidates,
        })
    }

    /// Returns the declared channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the declared candidate count.
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// Returns the number of class-score channels.
    pub fn class_count(&self) -> usize {
        self.channels - GEOMETRY_CHANNELS
    }

    /// Returns the backing slice in its physical channel-major order.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns the value at logical position `[candidate][channel]`.
    ///
    /// O(1); the physical layout is channel-major, so this reads
    /// `data[channel * candidates + candidate]`.
    ///
    /// # Panics
    ///
    /// Panics if `candidate` or `channel` is outside the declared shape.
    #[inline]
    pub fn at(&self, candidate: usize, channel: usize) -> f32 {
        assert!(candidate < self.candidates && channel < self.channels);
        self.data[channel * self.candidates + candidate]
    }

    /// Returns the raw center-form geometry of one candidate.
    ///
    /// No activation is applied; values are in model-input pixel units.
    #[inline]
    pub fn geometry(&self, candidate: usize) -> CenterBox {
        CenterBox {
            cx: self.at(candidate, 0),
            cy: self.at(candidate, 1),
            w: self.at(candidate, 2),
            h: self.at(candidate, 3),
        }
    }

    /// Returns the raw score of `class` for one candidate.
    #[inline]
    pub fn raw_score(&self, candidate: usize, class: usize) -> f32 {
        self.at(candidate, GEOMETRY_CHANNELS + class)
    }
}
