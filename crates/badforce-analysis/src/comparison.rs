//! Comparison orchestrator.
//!
//! [`PoseComparator::compare`] runs the full comparison of a user sequence
//! against a reference:
//!
//! ```text
//! reference ─┐                       ┌─► weighted_score ──► overall_score
//!            ├─► normalize_timeline ─┼─► KeypointScoreAccumulator ──► key_point_scores
//! user ──────┘                       ├─► DetailMetrics::compute ──► details
//!                                    └─► FeedbackGenerator ──► feedback, recommendations
//! ```
//!
//! A comparison either yields a complete [`ComparisonResult`] or fails
//! before any scoring starts.

use badforce_core::{utils, PoseSequence, ShotType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ComparisonConfig;
use crate::error::{AnalysisError, CompareResult};
use crate::feedback::FeedbackGenerator;
use crate::frame::{FrameComparator, FrameComparison};
use crate::importance::importance_set;
use crate::metrics::DetailMetrics;
use crate::normalize::normalize_timeline;
use crate::scoring::weighted_score;

// ---------------------------------------------------------------------------
// ComparisonResult
// ---------------------------------------------------------------------------

/// Everything a caller learns from one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Midpoint-weighted aggregate of the per-frame scores (0-100).
    pub overall_score: f64,
    /// Mean score of each keypoint over the frames where it qualified.
    ///
    /// Ordered by first appearance.
    pub key_point_scores: IndexMap<String, f64>,
    /// Presentation-ordered feedback messages.
    pub feedback: Vec<String>,
    /// Presentation-ordered recommendations.
    pub recommendations: Vec<String>,
    /// Position accuracy, timing and stability.
    pub details: DetailMetrics,
}

impl ComparisonResult {
    /// Serializes the result as pretty-printed camelCase JSON.
    pub fn to_json(&self) -> CompareResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a result previously written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> CompareResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ---------------------------------------------------------------------------
// KeypointScoreAccumulator
// ---------------------------------------------------------------------------

/// Running per-keypoint score streams across frame comparisons.
///
/// Feed every [`FrameComparison`] through [`update`](Self::update), then call
/// [`finalize`](Self::finalize) for the per-keypoint means.
#[derive(Debug, Default)]
pub struct KeypointScoreAccumulator {
    sums: IndexMap<String, (f64, usize)>,
    frame_scores: Vec<f64>,
}

impl KeypointScoreAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one frame comparison.
    pub fn update(&mut self, frame: FrameComparison) {
        self.frame_scores.push(frame.score);
        for (name, score) in frame.per_keypoint {
            let entry = self.sums.entry(name).or_insert((0.0, 0));
            entry.0 += score;
            entry.1 += 1;
        }
    }

    /// Number of frames accumulated so far.
    pub fn num_frames(&self) -> usize {
        self.frame_scores.len()
    }

    /// Per-frame overall scores, in frame order.
    pub fn frame_scores(&self) -> &[f64] {
        &self.frame_scores
    }

    /// Returns `(frame_scores, key_point_means)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn finalize(self) -> (Vec<f64>, IndexMap<String, f64>) {
        let means = self
            .sums
            .into_iter()
            .map(|(name, (sum, count))| (name, utils::clamp_score(sum / count as f64)))
            .collect();
        (self.frame_scores, means)
    }
}

// ---------------------------------------------------------------------------
// PoseComparator
// ---------------------------------------------------------------------------

/// Compares pose sequences under one [`ComparisonConfig`].
///
/// The comparator holds no mutable state; one instance can serve any number
/// of comparisons, from any number of threads.
///
/// # Example
///
/// ```rust
/// use badforce_analysis::{ComparisonConfig, PoseComparator};
/// use badforce_core::{Keypoint, PoseFrame, PoseSequence, ShotType};
///
/// let frame = PoseFrame::new(vec![Keypoint::from_raw(0.5, 0.5, 0.9).unwrap()], 0.0);
/// let seq: PoseSequence = vec![frame; 3].into();
///
/// let comparator = PoseComparator::new(ComparisonConfig::default());
/// let result = comparator.compare(&seq, &seq, ShotType::Smash).unwrap();
/// assert_eq!(result.overall_score, 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct PoseComparator {
    config: ComparisonConfig,
    frames: FrameComparator,
    feedback: FeedbackGenerator,
}

impl PoseComparator {
    /// Creates a comparator from `config`.
    ///
    /// The config is taken as-is; call [`ComparisonConfig::validate`] first
    /// when it comes from an untrusted source.
    pub fn new(config: ComparisonConfig) -> Self {
        let frames = FrameComparator::from_config(&config);
        let feedback = FeedbackGenerator::new(config.thresholds, config.language);
        PoseComparator {
            config,
            frames,
            feedback,
        }
    }

    /// Creates a comparator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Config`] if validation fails.
    pub fn try_new(config: ComparisonConfig) -> CompareResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The configuration in use.
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compares `user` against `reference` for a `shot_type` stroke.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInput`] if either sequence is empty.
    #[instrument(skip_all, fields(shot = %shot_type, reference = reference.len(), user = user.len()))]
    pub fn compare(
        &self,
        reference: &PoseSequence,
        user: &PoseSequence,
        shot_type: ShotType,
    ) -> CompareResult<ComparisonResult> {
        if reference.is_empty() {
            return Err(AnalysisError::invalid_input("reference sequence is empty"));
        }
        if user.is_empty() {
            return Err(AnalysisError::invalid_input("user sequence is empty"));
        }

        let target = self.config.target_frames;
        let reference = normalize_timeline(reference, target);
        let user = normalize_timeline(user, target);
        let keypoints = importance_set(shot_type);
        debug!(
            reference = reference.len(),
            user = user.len(),
            keypoints = keypoints.len(),
            "Normalized sequences"
        );

        let mut acc = KeypointScoreAccumulator::new();
        for (r, u) in reference.iter().zip(user.iter()) {
            acc.update(self.frames.compare(r, u, keypoints));
        }
        debug!(frames = acc.num_frames(), "Compared frames");

        let (frame_scores, key_point_scores) = acc.finalize();
        let overall_score = weighted_score(&frame_scores);
        let details = DetailMetrics::compute(&reference, &user, &self.frames);
        let feedback = self.feedback.feedback(&key_point_scores, &details);
        let recommendations = self
            .feedback
            .recommendations(&key_point_scores, &details, shot_type);

        debug!(
            overall_score,
            position_accuracy = details.position_accuracy,
            timing = details.timing,
            stability = details.stability,
            "Comparison complete"
        );

        Ok(ComparisonResult {
            overall_score,
            key_point_scores,
            feedback,
            recommendations,
            details,
        })
    }
}

impl Default for PoseComparator {
    fn default() -> Self {
        Self::new(ComparisonConfig::default())
    }
}

/// Compares two sequences with the default configuration.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] if either sequence is empty.
pub fn compare_poses(
    reference: &PoseSequence,
    user: &PoseSequence,
    shot_type: ShotType,
) -> CompareResult<ComparisonResult> {
    PoseComparator::default().compare(reference, user, shot_type)
}
