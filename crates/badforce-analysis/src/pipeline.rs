//! Staged analysis pipeline: capture reference, capture user, compare.
//!
//! Progress is reported as values handed to a caller-supplied observer.
//! Nothing is stored between runs, so a pipeline can be reused freely.
//!
//! | Stage                | Progress  |
//! |----------------------|-----------|
//! | `CapturingReference` | 0 → 50    |
//! | `CapturingUser`      | 50 → 90   |
//! | `Comparing`          | 90        |
//! | `Complete`           | 100       |

use badforce_core::capture::collect_sequence_with_progress;
use badforce_core::{CaptureProgress, KeypointProducer, ShotType};
use tracing::{debug, info};

use crate::comparison::{ComparisonResult, PoseComparator};
use crate::config::ComparisonConfig;
use crate::error::CompareResult;
use crate::feedback::Language;

// ---------------------------------------------------------------------------
// AnalysisStage
// ---------------------------------------------------------------------------

/// One step of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStage {
    /// Collecting the reference motion.
    CapturingReference,
    /// Collecting the user's motion.
    CapturingUser,
    /// Scoring the user against the reference.
    Comparing,
    /// Result available.
    Complete,
}

impl AnalysisStage {
    /// Progress band `(start, end)` in percent.
    pub fn band(&self) -> (f64, f64) {
        match self {
            AnalysisStage::CapturingReference => (0.0, 50.0),
            AnalysisStage::CapturingUser => (50.0, 90.0),
            AnalysisStage::Comparing => (90.0, 90.0),
            AnalysisStage::Complete => (100.0, 100.0),
        }
    }

    /// Status line shown while this stage runs.
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (AnalysisStage::CapturingReference, Language::Korean) => "기준 영상 분석 중...",
            (AnalysisStage::CapturingUser, Language::Korean) => "사용자 영상 분석 중...",
            (AnalysisStage::Comparing, Language::Korean) => "자세 비교 분석 중...",
            (AnalysisStage::Complete, Language::Korean) => "분석 완료",
            (AnalysisStage::CapturingReference, Language::English) => "Analyzing reference video...",
            (AnalysisStage::CapturingUser, Language::English) => "Analyzing your video...",
            (AnalysisStage::Comparing, Language::English) => "Comparing poses...",
            (AnalysisStage::Complete, Language::English) => "Analysis complete",
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisProgress
// ---------------------------------------------------------------------------

/// A progress report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisProgress {
    /// Current stage.
    pub stage: AnalysisStage,
    /// Overall progress in percent (0-100).
    pub percent: f64,
}

impl AnalysisProgress {
    /// Progress at `fraction` (clamped to [0, 1]) of the way through `stage`.
    pub fn within(stage: AnalysisStage, fraction: f64) -> Self {
        let (start, end) = stage.band();
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        AnalysisProgress {
            stage,
            percent: start + (end - start) * fraction,
        }
    }

    /// Progress at the start of `stage`.
    pub fn start_of(stage: AnalysisStage) -> Self {
        Self::within(stage, 0.0)
    }
}

// ---------------------------------------------------------------------------
// AnalysisPipeline
// ---------------------------------------------------------------------------

/// Drives two producers through capture and compares the results.
///
/// # Example
///
/// ```rust
/// use badforce_analysis::pipeline::AnalysisPipeline;
/// use badforce_core::{ShotType, SyntheticConfig, SyntheticProducer};
///
/// let mut reference = SyntheticProducer::default();
/// let mut user = SyntheticProducer::new(SyntheticConfig { offset: 0.02, ..Default::default() });
///
/// let pipeline = AnalysisPipeline::default();
/// let mut last = 0.0;
/// let result = pipeline
///     .run_with_progress(&mut reference, &mut user, ShotType::Smash, |p| last = p.percent)
///     .unwrap();
///
/// assert_eq!(last, 100.0);
/// assert!(result.overall_score > 90.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    comparator: PoseComparator,
}

impl AnalysisPipeline {
    /// Creates a pipeline from `config`.
    pub fn new(config: ComparisonConfig) -> Self {
        Self::with_comparator(PoseComparator::new(config))
    }

    /// Creates a pipeline around an existing comparator.
    pub fn with_comparator(comparator: PoseComparator) -> Self {
        AnalysisPipeline { comparator }
    }

    /// The comparator used in the comparison stage.
    pub fn comparator(&self) -> &PoseComparator {
        &self.comparator
    }

    /// Runs all stages without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`run_with_progress`](Self::run_with_progress).
    pub fn run(
        &self,
        reference: &mut dyn KeypointProducer,
        user: &mut dyn KeypointProducer,
        shot_type: ShotType,
    ) -> CompareResult<ComparisonResult> {
        self.run_with_progress(reference, user, shot_type, |_| {})
    }

    /// Runs all stages, reporting progress to `observer`.
    ///
    /// Reported percentages never decrease. The final report is
    /// [`AnalysisStage::Complete`] at 100, sent only on success.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Core`] wrapping the capture error if either
    /// producer fails, in which case no comparison is attempted, and
    /// [`AnalysisError::InvalidInput`] if comparison rejects the sequences.
    ///
    /// [`AnalysisError::Core`]: crate::error::AnalysisError::Core
    /// [`AnalysisError::InvalidInput`]: crate::error::AnalysisError::InvalidInput
    pub fn run_with_progress(
        &self,
        reference: &mut dyn KeypointProducer,
        user: &mut dyn KeypointProducer,
        shot_type: ShotType,
        mut observer: impl FnMut(AnalysisProgress),
    ) -> CompareResult<ComparisonResult> {
        let language = self.comparator.config().language;

        let stage = AnalysisStage::CapturingReference;
        debug!(stage = stage.label(language), producer = reference.name());
        observer(AnalysisProgress::start_of(stage));
        let reference_seq = collect_sequence_with_progress(reference, Some(shot_type), |p: CaptureProgress| {
            observer(AnalysisProgress::within(stage, p.fraction()));
        })?;

        let stage = AnalysisStage::CapturingUser;
        debug!(stage = stage.label(language), producer = user.name());
        observer(AnalysisProgress::start_of(stage));
        let user_seq = collect_sequence_with_progress(user, Some(shot_type), |p: CaptureProgress| {
            observer(AnalysisProgress::within(stage, p.fraction()));
        })?;

        let stage = AnalysisStage::Comparing;
        debug!(
            stage = stage.label(language),
            reference = reference_seq.len(),
            user = user_seq.len()
        );
        observer(AnalysisProgress::start_of(stage));
        let result = self.comparator.compare(&reference_seq, &user_seq, shot_type)?;

        observer(AnalysisProgress::start_of(AnalysisStage::Complete));
        info!(
            shot = %shot_type,
            overall_score = result.overall_score,
            "Analysis complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bands_are_contiguous() {
        assert_eq!(AnalysisStage::CapturingReference.band().1, AnalysisStage::CapturingUser.band().0);
        assert_eq!(AnalysisStage::CapturingUser.band().1, AnalysisStage::Comparing.band().0);
    }

    #[test]
    fn within_interpolates_band() {
        let p = AnalysisProgress::within(AnalysisStage::CapturingUser, 0.5);
        assert_abs_diff_eq!(p.percent, 70.0, epsilon = 1e-12);

        let p = AnalysisProgress::within(AnalysisStage::CapturingReference, 3.0);
        assert_eq!(p.percent, 50.0);

        let p = AnalysisProgress::within(AnalysisStage::CapturingReference, f64::NAN);
        assert_eq!(p.percent, 0.0);
    }

    #[test]
    fn labels() {
        assert_eq!(AnalysisStage::Complete.label(Language::Korean), "분석 완료");
        assert_eq!(AnalysisStage::Comparing.label(Language::English), "Comparing poses...");
    }
}
