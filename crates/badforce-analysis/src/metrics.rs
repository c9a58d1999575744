//! Detail metrics reported alongside the overall score.
//!
//! This module provides three independent sub-metrics, each in `[0, 100]`:
//!
//! - **Position accuracy**: mean frame-comparator score over the shared
//!   prefix of both sequences, always using the smash importance set.
//! - **Timing**: ratio of the shorter to the longer sequence length. This is
//!   a duration-similarity proxy only; no temporal alignment is performed.
//! - **Stability**: jerkiness of the user's own motion, independent of the
//!   reference.

use badforce_core::{utils, PoseFrame, PoseSequence, MAX_SCORE};
use serde::{Deserialize, Serialize};

use crate::frame::FrameComparator;
use crate::importance::SMASH_KEYPOINTS;

// ---------------------------------------------------------------------------
// DetailMetrics
// ---------------------------------------------------------------------------

/// Secondary scores attached to every comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailMetrics {
    /// Spatial agreement with the reference (0-100).
    pub position_accuracy: f64,
    /// Duration similarity (0-100).
    pub timing: f64,
    /// Smoothness of the user's motion (0-100).
    pub stability: f64,
}

impl DetailMetrics {
    /// Computes all three metrics from already-normalized sequences.
    #[must_use]
    pub fn compute(
        reference: &PoseSequence,
        user: &PoseSequence,
        comparator: &FrameComparator,
    ) -> Self {
        DetailMetrics {
            position_accuracy: position_accuracy(reference, user, comparator),
            timing: timing_score(reference.len(), user.len()),
            stability: stability_score(user, comparator.confidence_threshold()),
        }
    }
}

// ---------------------------------------------------------------------------
// Position accuracy
// ---------------------------------------------------------------------------

/// Mean smash-set frame score over `min(len(reference), len(user))` pairs.
///
/// The smash set is used whatever shot is being analysed. Returns 0 when
/// either sequence is empty.
#[must_use]
pub fn position_accuracy(
    reference: &PoseSequence,
    user: &PoseSequence,
    comparator: &FrameComparator,
) -> f64 {
    let scores: Vec<f64> = reference
        .iter()
        .zip(user.iter())
        .map(|(r, u)| comparator.compare(r, u, &SMASH_KEYPOINTS).score)
        .collect();
    utils::clamp_score(utils::mean(&scores))
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// `min / max * 100` of the two sequence lengths; 0 if either is empty.
#[must_use]
pub fn timing_score(reference_len: usize, user_len: usize) -> f64 {
    let longest = reference_len.max(user_len);
    if longest == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = reference_len.min(user_len) as f64 / longest as f64;
    utils::clamp_score(ratio * MAX_SCORE)
}

// ---------------------------------------------------------------------------
// Stability
// ---------------------------------------------------------------------------

/// Mean absolute change in speed across one interior frame.
///
/// Only keypoint indices that are reliable in all three frames count. A frame
/// with none contributes 0.
fn frame_variation(prev: &PoseFrame, curr: &PoseFrame, next: &PoseFrame, threshold: f64) -> f64 {
    let accelerations: Vec<f64> = prev
        .keypoints
        .iter()
        .zip(&curr.keypoints)
        .zip(&next.keypoints)
        .filter(|((p, c), n)| {
            p.is_reliable(threshold) && c.is_reliable(threshold) && n.is_reliable(threshold)
        })
        .map(|((p, c), n)| {
            let v1 = p.distance_to(c);
            let v2 = c.distance_to(n);
            (v2 - v1).abs()
        })
        .collect();
    utils::mean(&accelerations)
}

/// Smoothness of `user`: `max(0, 100 - 50 * avg_variation)`.
///
/// Sequences of fewer than three frames have no interior frame and score 100.
#[must_use]
pub fn stability_score(user: &PoseSequence, confidence_threshold: f64) -> f64 {
    let frames = user.frames();
    if frames.len() < 3 {
        return MAX_SCORE;
    }

    let variations: Vec<f64> = frames
        .windows(3)
        .map(|w| frame_variation(&w[0], &w[1], &w[2], confidence_threshold))
        .collect();
    utils::clamp_score(MAX_SCORE - utils::mean(&variations) * 50.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use badforce_core::{Keypoint, CONFIDENCE_THRESHOLD};

    fn seq(points: &[(f64, f64, f64)]) -> PoseSequence {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y, c))| {
                PoseFrame::new(vec![Keypoint::from_raw(x, y, c).unwrap()], i as f64 * 33.0)
            })
            .collect()
    }

    #[test]
    fn timing_is_length_ratio() {
        assert_abs_diff_eq!(timing_score(30, 60), 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(timing_score(60, 30), 50.0, epsilon = 1e-12);
        assert_eq!(timing_score(45, 45), 100.0);
        assert_eq!(timing_score(0, 0), 0.0);
    }

    #[test]
    fn two_frames_are_perfectly_stable() {
        let user = seq(&[(0.0, 0.0, 0.9), (1.0, 1.0, 0.9)]);
        assert_eq!(stability_score(&user, CONFIDENCE_THRESHOLD), 100.0);
    }

    #[test]
    fn constant_velocity_is_stable() {
        let user = seq(&[(0.1, 0.5, 0.9), (0.2, 0.5, 0.9), (0.3, 0.5, 0.9), (0.4, 0.5, 0.9)]);
        assert_abs_diff_eq!(stability_score(&user, CONFIDENCE_THRESHOLD), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn acceleration_lowers_stability() {
        // speeds 0.0 then 0.4 → acceleration 0.4 → 100 - 20
        let user = seq(&[(0.1, 0.5, 0.9), (0.1, 0.5, 0.9), (0.5, 0.5, 0.9)]);
        assert_abs_diff_eq!(stability_score(&user, CONFIDENCE_THRESHOLD), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn unreliable_interior_frame_counts_as_zero_variation() {
        let user = seq(&[(0.1, 0.5, 0.9), (0.1, 0.5, 0.2), (0.9, 0.5, 0.9)]);
        assert_eq!(stability_score(&user, CONFIDENCE_THRESHOLD), 100.0);
    }

    #[test]
    fn huge_jitter_floors_at_zero() {
        let user = seq(&[(0.0, 0.0, 0.9), (0.0, 0.0, 0.9), (5.0, 5.0, 0.9)]);
        assert_eq!(stability_score(&user, CONFIDENCE_THRESHOLD), 0.0);
    }

    #[test]
    fn position_accuracy_ignores_unmatched_tail() {
        let reference = seq(&[(0.5, 0.5, 0.9), (0.5, 0.5, 0.9), (0.5, 0.5, 0.9)]);
        let user = seq(&[(0.6, 0.5, 0.9)]);
        let acc = position_accuracy(&reference, &user, &FrameComparator::default());
        assert_abs_diff_eq!(acc, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn compute_bundles_all_three() {
        let reference = seq(&[(0.5, 0.5, 0.9), (0.5, 0.5, 0.9)]);
        let user = seq(&[(0.5, 0.5, 0.9)]);
        let details = DetailMetrics::compute(&reference, &user, &FrameComparator::default());

        assert_eq!(details.position_accuracy, 100.0);
        assert_abs_diff_eq!(details.timing, 50.0, epsilon = 1e-12);
        assert_eq!(details.stability, 100.0);
    }
}
