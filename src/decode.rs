//! Candidate decoding: tensor rows to confidence-filtered scored boxes.
//!
//! The decoder walks candidates in index order, takes a stable argmax over
//! the activated class scores and yields a [`ScoredBox`] for every candidate
//! whose best score clears the confidence threshold. Decoding is lazy: rows
//! below the threshold cost one scan and no allocation.

use crate::geometry::CenterBox;
use crate::tensor::TensorView;
use crate::util::{DetBoxError, DetBoxResult};

/// Activation applied to raw class-score channels before thresholding.
///
/// Detector exports disagree on whether the class channels carry logits or
/// probabilities, so the caller must declare which; there is no default.
/// Geometry channels are never activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreActivation {
    /// Scores are already probabilities; use them as-is.
    Identity,
    /// Scores are logits; apply the logistic sigmoid `1 / (1 + e^-x)`.
    Sigmoid,
}

impl ScoreActivation {
    /// Applies the activation to one raw score.
    #[inline]
    pub fn apply(self, raw: f32) -> f32 {
        match self {
            Self::Identity => raw,
            Self::Sigmoid => 1.0 / (1.0 + (-raw).exp()),
        }
    }
}

/// One candidate that passed the confidence filter.
///
/// `class` indexes the caller's label table; the box is still center-form in
/// model-input pixel space. Consumed by suppression within a single pipeline
/// invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredBox {
    /// Index of the winning class.
    pub class: usize,
    /// Activated score of the winning class, strictly above the threshold.
    pub confidence: f32,
    /// Raw center-form geometry in model-input pixel units.
    pub bbox: CenterBox,
}

/// Decodes a tensor into a lazy sequence of confidence-filtered boxes.
///
/// `class_count` is the caller's expectation; a tensor whose channel count
/// is not `4 + class_count` fails fast with [`DetBoxError::ShapeMismatch`]
/// before any candidate is read. The returned iterator yields boxes in
/// candidate-index order (not sorted by confidence) and is pure: iterating
/// it has no side effects on the tensor.
pub fn decode(
    tensor: TensorView<'_>,
    class_count: usize,
    confidence_threshold: f32,
    activation: ScoreActivation,
) -> DetBoxResult<Candidates<'_>> {
    if tensor.class_count() != class_count {
        return Err(DetBoxError::ShapeMismatch {
            channels: tensor.channels(),
            candidates: tensor.candidates(),
        });
    }
    Ok(Candidates {
        tensor,
        next: 0,
        confidence_threshold,
        activation,
    })
}

/// Iterator over confidence-filtered candidates of one tensor.
///
/// Finite and non-restartable; call [`decode`] again for another pass.
#[derive(Clone, Debug)]
pub struct Candidates<'a> {
    tensor: TensorView<'a>,
    next: usize,
    confidence_threshold: f32,
    activation: ScoreActivation,
}

impl Iterator for Candidates<'_> {
    type Item = ScoredBox;

    fn next(&mut self) -> Option<ScoredBox> {
        while self.next < self.tensor.candidates() {
            let candidate = self.next;
            self.next += 1;

            // Stable argmax: strict comparison keeps the lowest class index
            // on ties.
            let mut best_class = 0usize;
            let mut best_score = self.activation.apply(self.tensor.raw_score(candidate, 0));
            for class in 1..self.tensor.class_count() {
                let score = self.activation.apply(self.tensor.raw_score(candidate, class));
                if score > best_score {
                    best_score = score;
                    best_class = class;
                }
            }

            if best_score > self.confidence_threshold {
                return Some(ScoredBox {
                    class: best_class,
                    confidence: best_score,
                    bbox: self.tensor.geometry(candidate),
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tensor.candidates() - self.next))
    }
}
