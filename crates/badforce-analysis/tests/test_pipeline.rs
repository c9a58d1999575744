//! Integration tests for [`badforce_analysis::pipeline`].

use badforce_analysis::error::AnalysisError;
use badforce_analysis::pipeline::{AnalysisPipeline, AnalysisProgress, AnalysisStage};
use badforce_analysis::{ComparisonConfig, Language};
use badforce_core::{
    CaptureError, CoreError, FrameSink, KeypointProducer, ShotType, SyntheticConfig,
    SyntheticProducer,
};

fn synthetic(offset: f64) -> SyntheticProducer {
    SyntheticProducer::new(SyntheticConfig {
        offset,
        ..SyntheticConfig::default()
    })
}

/// Announces nothing and completes without any frames.
struct SilentProducer;

impl KeypointProducer for SilentProducer {
    fn name(&self) -> &str {
        "silent"
    }

    fn produce(&mut self, sink: &mut dyn FrameSink) -> Result<(), CaptureError> {
        sink.on_complete();
        Ok(())
    }
}

#[test]
fn identical_producers_score_perfectly() {
    let pipeline = AnalysisPipeline::default();
    let result = pipeline
        .run(&mut synthetic(0.0), &mut synthetic(0.0), ShotType::Smash)
        .unwrap();

    assert!((result.overall_score - 100.0).abs() < 1e-9);
    assert_eq!(result.details.timing, 100.0);
}

#[test]
fn progress_is_monotonic_and_ends_at_100() {
    let mut reports: Vec<AnalysisProgress> = Vec::new();
    AnalysisPipeline::default()
        .run_with_progress(&mut synthetic(0.0), &mut synthetic(0.05), ShotType::Clear, |p| {
            reports.push(p)
        })
        .unwrap();

    assert!(reports.windows(2).all(|w| w[0].percent <= w[1].percent));
    assert_eq!(reports.first().map(|p| p.percent), Some(0.0));

    let last = reports.last().copied().unwrap();
    assert_eq!(last.stage, AnalysisStage::Complete);
    assert_eq!(last.percent, 100.0);

    let stages: Vec<AnalysisStage> = reports.iter().map(|p| p.stage).collect();
    for stage in [
        AnalysisStage::CapturingReference,
        AnalysisStage::CapturingUser,
        AnalysisStage::Comparing,
    ] {
        assert!(stages.contains(&stage), "missing {stage:?}");
    }

    let reference_done = reports
        .iter()
        .filter(|p| p.stage == AnalysisStage::CapturingReference)
        .map(|p| p.percent)
        .fold(0.0, f64::max);
    assert_eq!(reference_done, 50.0);

    let comparing = reports.iter().find(|p| p.stage == AnalysisStage::Comparing).unwrap();
    assert_eq!(comparing.percent, 90.0);
}

#[test]
fn reference_failure_aborts_before_user_capture() {
    let mut reference = SyntheticProducer::new(SyntheticConfig {
        fail_after: Some(10),
        ..SyntheticConfig::default()
    });
    let mut user = synthetic(0.0);
    let mut reports = Vec::new();

    let err = AnalysisPipeline::default()
        .run_with_progress(&mut reference, &mut user, ShotType::Smash, |p| reports.push(p))
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Core(CoreError::Capture(CaptureError::StreamFailed { .. }))
    ));
    assert!(reports.iter().all(|p| p.stage == AnalysisStage::CapturingReference));

    // The user producer was never started, so it can still run.
    let mut sink = badforce_core::SequenceCollector::new();
    assert!(user.produce(&mut sink).is_ok());
}

#[test]
fn empty_stream_is_a_capture_error() {
    let err = AnalysisPipeline::default()
        .run(&mut synthetic(0.0), &mut SilentProducer, ShotType::Serve)
        .unwrap_err();

    assert!(matches!(
        err,
        AnalysisError::Core(CoreError::Capture(CaptureError::NoFrames))
    ));
}

#[test]
fn pipeline_uses_its_config() {
    let pipeline = AnalysisPipeline::new(ComparisonConfig {
        language: Language::English,
        ..ComparisonConfig::default()
    });
    assert_eq!(pipeline.comparator().config().language, Language::English);

    let result = pipeline
        .run(&mut synthetic(0.0), &mut synthetic(0.0), ShotType::Clear)
        .unwrap();
    assert_eq!(
        result.recommendations,
        vec!["Take the racket all the way back on a clear."]
    );
}
