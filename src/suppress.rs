//! Greedy non-maximum suppression over scored boxes.

use crate::decode::ScoredBox;
use crate::geometry::{iou, CornerBox};
use crate::trace::trace_span;

/// Scope of suppression between overlapping boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuppressionMode {
    /// A kept box suppresses overlapping boxes of any class.
    #[default]
    Global,
    /// A kept box only suppresses overlapping boxes of its own class.
    PerClass,
}

/// Reduces an overlapping candidate set to a de-duplicated detection list.
///
/// Candidates are materialized and stably sorted by descending confidence
/// (ties keep their decode order, so the result is deterministic). The
/// highest-confidence survivor is kept, every remaining candidate with
/// `iou >= iou_threshold` against it is discarded, and the scan repeats on
/// the rest. Selection runs over the sorted snapshot with a tombstone mask
/// rather than removing elements in place. O(n²) comparisons worst case.
///
/// The returned list is ordered by descending confidence. No kept pair has
/// `iou >= iou_threshold` (in [`SuppressionMode::PerClass`], no kept pair of
/// the same class).
pub fn suppress<I>(candidates: I, iou_threshold: f32, mode: SuppressionMode) -> Vec<ScoredBox>
where
    I: IntoIterator<Item = ScoredBox>,
{
    let mut pool: Vec<ScoredBox> = candidates.into_iter().collect();
    pool.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let _span = trace_span!("suppress", candidates = pool.len()).entered();

    let corners: Vec<CornerBox> = pool.iter().map(|c| c.bbox.to_corners()).collect();
    let mut removed = vec![false; pool.len()];
    let mut kept = Vec::new();

    for best in 0..pool.len() {
        if removed[best] {
            continue;
        }
        kept.push(pool[best]);

        for other in best + 1..pool.len() {
            if removed[other] {
                continue;
            }
            if mode == SuppressionMode::PerClass && pool[other].class != pool[best].class {
                continue;
            }
            if iou(corners[best], corners[other]) >= iou_threshold {
                removed[other] = true;
            }
        }
    }

    kept
}
