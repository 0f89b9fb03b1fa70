//! Detbox turns raw object-detector output tensors into de-duplicated,
//! labeled bounding boxes.
//!
//! The crate covers the post-processing shared by every inference call site:
//! a zero-copy transposed view over the channel-major output buffer, lazy
//! per-candidate score decoding with a configurable activation, greedy
//! non-maximum suppression, and rescaling of the survivors back to
//! original-image pixel space. The whole pipeline is a pure synchronous
//! computation with no I/O and no shared state, safe to invoke concurrently
//! on independent inputs.

pub mod decode;
pub mod geometry;
mod labels;
pub mod pipeline;
pub mod suppress;
pub mod tensor;
mod trace;
pub mod util;

pub use decode::{decode, Candidates, ScoreActivation, ScoredBox};
pub use geometry::{iou, rescale, CenterBox, CornerBox, Size};
pub use labels::WILDLIFE_CLASSES;
pub use pipeline::{DetectionResult, Pipeline, PipelineConfig};
pub use suppress::{suppress, SuppressionMode};
pub use tensor::{TensorView, GEOMETRY_CHANNELS};
pub use util::{DetBoxError, DetBoxResult};
