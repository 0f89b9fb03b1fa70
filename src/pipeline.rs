//! The full detection post-processing pipeline.
//!
//! [`Pipeline`] is the single public entry point shared by every call site:
//! decode, suppress and rescale in one synchronous pass, with no state
//! retained between calls. An invocation only touches its own input tensor
//! and output list, so independent invocations are safe from any number of
//! threads.

use crate::decode::{decode, ScoreActivation};
use crate::geometry::{rescale, CornerBox, Size};
use crate::suppress::{suppress, SuppressionMode};
use crate::tensor::TensorView;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetBoxError, DetBoxResult};

/// Tuning parameters for a detection pipeline.
///
/// Defaults carry the production reference values. The score activation is
/// not part of this struct; it must be declared per pipeline in
/// [`Pipeline::new`].
#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    /// Minimum activated class score for a candidate to survive decoding
    /// (strict comparison).
    pub confidence_threshold: f32,
    /// IoU at or above which a lower-confidence box is suppressed.
    pub iou_threshold: f32,
    /// Whether suppression crosses class boundaries.
    pub suppression: SuppressionMode,
    /// Pixel size of the model input the tensor geometry refers to.
    pub input_size: Size,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.25,
            iou_threshold: 0.45,
            suppression: SuppressionMode::Global,
            input_size: Size::new(640.0, 640.0),
        }
    }
}

/// One detection in original-image pixel space.
///
/// Handed to the caller immediately; the pipeline keeps no history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionResult<'a> {
    /// Human-readable class name, borrowed from the caller's label table.
    pub label: &'a str,
    /// Index of the class in the label table.
    pub class: usize,
    /// Activated confidence in `(threshold, 1]`.
    pub confidence: f32,
    /// Corner-form box in original-image pixels.
    pub bbox: CornerBox,
}

/// Detection post-processing pipeline: decode, suppress, rescale.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline {
    activation: ScoreActivation,
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline with default configuration.
    ///
    /// Model exports disagree on whether class channels carry logits or
    /// probabilities; the caller must declare which.
    pub fn new(activation: ScoreActivation) -> Self {
        Self {
            activation,
            config: PipelineConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the declared score activation.
    pub fn activation(&self) -> ScoreActivation {
        self.activation
    }

    /// Runs the pipeline on one tensor.
    ///
    /// Fails fast with [`DetBoxError::LabelCountMismatch`] when the label
    /// table does not match the tensor's class channels; no candidate is
    /// decoded in that case. Otherwise returns the surviving detections in
    /// descending confidence order, with boxes rescaled from
    /// `config.input_size` to `original_size`. An empty list is the normal
    /// "no detection" outcome, not an error.
    pub fn run<'a>(
        &self,
        tensor: TensorView<'_>,
        labels: &'a [&str],
        original_size: Size,
    ) -> DetBoxResult<Vec<DetectionResult<'a>>> {
        if labels.len() != tensor.class_count() {
            return Err(DetBoxError::LabelCountMismatch {
                labels: labels.len(),
                classes: tensor.class_count(),
            });
        }

        let _span = trace_span!("detect", candidates = tensor.candidates()).entered();

        let decoded: Vec<_> = decode(
            tensor,
            labels.len(),
            self.config.confidence_threshold,
            self.activation,
        )?
        .collect();
        trace_event!("decoded", count = decoded.len());

        let kept = suppress(decoded, self.config.iou_threshold, self.config.suppression);
        trace_event!("suppressed", kept = kept.len());

        Ok(kept
            .into_iter()
            .map(|c| DetectionResult {
                label: labels[c.class],
                class: c.class,
                confidence: c.confidence,
                bbox: rescale(c.bbox.to_corners(), self.config.input_size, original_size),
            })
            .collect())
    }

    /// Runs the pipeline and returns only the highest-confidence detection.
    ///
    /// `Ok(None)` when nothing clears the confidence threshold.
    pub fn run_best<'a>(
        &self,
        tensor: TensorView<'_>,
        labels: &'a [&str],
        original_size: Size,
    ) -> DetBoxResult<Option<DetectionResult<'a>>> {
        Ok(self.run(tensor, labels, original_size)?.into_iter().next())
    }
}
