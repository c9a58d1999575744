//! Frame comparator: scores one reference frame against one user frame.
//!
//! Each importance-set keypoint that is present in both frames, and whose
//! confidence is strictly above the threshold in both, scores
//! `max(0, 100 - 100 * d)` where `d` is the Euclidean distance in normalized
//! image coordinates. The frame score is the mean of those keypoint scores,
//! or 0 when none qualify.

use badforce_core::{utils, Keypoint, PoseFrame, CONFIDENCE_THRESHOLD};
use indexmap::IndexMap;

use crate::config::ComparisonConfig;
use crate::importance::KeypointMatching;

/// Outcome of comparing two frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameComparison {
    /// Mean of the qualifying keypoint scores (0-100).
    pub score: f64,
    /// Score of every qualifying keypoint, in importance-set order.
    pub per_keypoint: IndexMap<String, f64>,
}

impl FrameComparison {
    /// Returns `true` when no keypoint qualified for scoring.
    pub fn is_empty(&self) -> bool {
        self.per_keypoint.is_empty()
    }
}

/// Scores frame pairs over a named keypoint subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameComparator {
    confidence_threshold: f64,
    matching: KeypointMatching,
}

impl FrameComparator {
    /// Creates a comparator.
    pub fn new(confidence_threshold: f64, matching: KeypointMatching) -> Self {
        FrameComparator {
            confidence_threshold,
            matching,
        }
    }

    /// Creates a comparator from the relevant fields of `config`.
    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self::new(config.confidence_threshold, config.matching)
    }

    /// Confidence cut-off in use.
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Scores a single keypoint pair, or `None` if either side is unreliable.
    pub fn keypoint_score(&self, reference: &Keypoint, user: &Keypoint) -> Option<f64> {
        let threshold = self.confidence_threshold;
        (reference.is_reliable(threshold) && user.is_reliable(threshold))
            .then(|| utils::distance_to_score(reference.distance_to(user)))
    }

    /// Compares `reference` with `user` over `keypoints`.
    pub fn compare(
        &self,
        reference: &PoseFrame,
        user: &PoseFrame,
        keypoints: &[&str],
    ) -> FrameComparison {
        let mut per_keypoint = IndexMap::with_capacity(keypoints.len());
        let mut total = 0.0;
        let mut valid = 0usize;

        for (rank, name) in keypoints.iter().enumerate() {
            let Some(index) = self.matching.resolve(rank, name) else {
                continue;
            };
            let (Some(ref_kp), Some(user_kp)) = (reference.keypoint(index), user.keypoint(index))
            else {
                continue;
            };
            if let Some(score) = self.keypoint_score(ref_kp, user_kp) {
                per_keypoint.insert((*name).to_string(), score);
                total += score;
                valid += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let score = if valid > 0 {
            utils::clamp_score(total / valid as f64)
        } else {
            0.0
        };
        FrameComparison {
            score,
            per_keypoint,
        }
    }
}

impl Default for FrameComparator {
    fn default() -> Self {
        Self::new(CONFIDENCE_THRESHOLD, KeypointMatching::Positional)
    }
}

/// Compares two frames with the default threshold and positional matching.
pub fn compare_frames(reference: &PoseFrame, user: &PoseFrame, keypoints: &[&str]) -> FrameComparison {
    FrameComparator::default().compare(reference, user, keypoints)
}
