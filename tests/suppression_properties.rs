use detbox::{iou, suppress, CenterBox, ScoredBox, SuppressionMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_candidates(rng: &mut StdRng, count: usize) -> Vec<ScoredBox> {
    (0..count)
        .map(|_| ScoredBox {
            class: rng.random_range(0..20),
            confidence: rng.random_range(0.25..1.0),
            bbox: CenterBox {
                cx: rng.random_range(0.0..640.0),
                cy: rng.random_range(0.0..640.0),
                w: rng.random_range(1.0..200.0),
                h: rng.random_range(1.0..200.0),
            },
        })
        .collect()
}

#[test]
fn suppression_never_grows_the_candidate_set() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let candidates = random_candidates(&mut rng, 200);
        let kept = suppress(candidates.clone(), 0.45, SuppressionMode::Global);
        assert!(kept.len() <= candidates.len());
    }
}

#[test]
fn suppression_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(11);
    for threshold in [0.3, 0.45, 0.7] {
        let candidates = random_candidates(&mut rng, 150);
        let once = suppress(candidates, threshold, SuppressionMode::Global);
        let twice = suppress(once.clone(), threshold, SuppressionMode::Global);
        assert_eq!(once, twice);
    }
}

#[test]
fn kept_boxes_are_mutually_exclusive() {
    let mut rng = StdRng::seed_from_u64(13);
    let threshold = 0.45;
    for _ in 0..10 {
        let candidates = random_candidates(&mut rng, 300);
        let kept = suppress(candidates, threshold, SuppressionMode::Global);
        for i in 0..kept.len() {
            for j in i + 1..kept.len() {
                let overlap = iou(kept[i].bbox.to_corners(), kept[j].bbox.to_corners());
                assert!(
                    overlap < threshold,
                    "kept pair with iou {overlap} at threshold {threshold}"
                );
            }
        }
    }
}

#[test]
fn per_class_mode_is_mutually_exclusive_within_each_class() {
    let mut rng = StdRng::seed_from_u64(17);
    let threshold = 0.45;
    let candidates = random_candidates(&mut rng, 300);
    let kept = suppress(candidates, threshold, SuppressionMode::PerClass);
    for i in 0..kept.len() {
        for j in i + 1..kept.len() {
            if kept[i].class != kept[j].class {
                continue;
            }
            let overlap = iou(kept[i].bbox.to_corners(), kept[j].bbox.to_corners());
            assert!(overlap < threshold);
        }
    }
}

#[test]
fn iou_is_symmetric_and_bounded_on_random_boxes() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..1000 {
        let a = CenterBox {
            cx: rng.random_range(0.0..640.0),
            cy: rng.random_range(0.0..640.0),
            w: rng.random_range(0.0..200.0),
            h: rng.random_range(0.0..200.0),
        }
        .to_corners();
        let b = CenterBox {
            cx: rng.random_range(0.0..640.0),
            cy: rng.random_range(0.0..640.0),
            w: rng.random_range(0.0..200.0),
            h: rng.random_range(0.0..200.0),
        }
        .to_corners();

        let ab = iou(a, b);
        let ba = iou(b, a);
        assert!((ab - ba).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&ab));
    }
}

#[test]
fn disjoint_boxes_survive_any_threshold() {
    let near = ScoredBox {
        class: 0,
        confidence: 0.9,
        bbox: CenterBox {
            cx: 50.0,
            cy: 50.0,
            w: 40.0,
            h: 40.0,
        },
    };
    let far = ScoredBox {
        class: 0,
        confidence: 0.5,
        bbox: CenterBox {
            cx: 500.0,
            cy: 500.0,
            w: 40.0,
            h: 40.0,
        },
    };
    assert_eq!(iou(near.bbox.to_corners(), far.bbox.to_corners()), 0.0);

    // Suppression removes at iou >= threshold, so any positive threshold
    // leaves zero-overlap pairs alone.
    for threshold in [0.05, 0.45, 1.0] {
        let kept = suppress(vec![near, far], threshold, SuppressionMode::Global);
        assert_eq!(kept.len(), 2);
    }
}
