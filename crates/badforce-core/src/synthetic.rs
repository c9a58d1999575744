//! Deterministic stand-in for a keypoint estimator.
//!
//! [`SyntheticProducer`] plays back an overhead swing on a standing figure.
//! No random numbers are used: jitter is a fixed sinusoid, so two producers
//! with the same [`SyntheticConfig`] emit identical frames.

use std::f64::consts::PI;

use crate::error::CaptureError;
use crate::traits::{FrameSink, KeypointProducer};
use crate::types::{Confidence, Keypoint, PoseFrame, SkeletonTemplate};

/// Parameters of a synthetic capture.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    /// Landmark layout of the emitted frames. Default: MediaPipe 33.
    pub template: SkeletonTemplate,
    /// Number of frames. Default: **60** (two seconds at 30 fps).
    pub frames: usize,
    /// Frame rate used for timestamps. Default: **30.0**.
    pub fps: f64,
    /// Horizontal shift applied to every landmark. Default: **0.0**.
    pub offset: f64,
    /// Amplitude of the per-frame positional wobble. Default: **0.0**.
    pub jitter: f64,
    /// Confidence reported for every landmark. Default: **0.9**.
    pub confidence: f64,
    /// Fail the stream after this many frames, if set.
    pub fail_after: Option<usize>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            template: SkeletonTemplate::MediaPipe33,
            frames: 60,
            fps: 30.0,
            offset: 0.0,
            jitter: 0.0,
            confidence: 0.9,
            fail_after: None,
        }
    }
}

/// A producer that emits a scripted swing.
#[derive(Debug, Clone)]
pub struct SyntheticProducer {
    config: SyntheticConfig,
    finished: bool,
}

impl SyntheticProducer {
    /// Creates a producer for `config`.
    #[must_use]
    pub fn new(config: SyntheticConfig) -> Self {
        Self {
            config,
            finished: false,
        }
    }

    /// The producer's configuration.
    #[must_use]
    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }

    /// Builds frame `index` without streaming it.
    ///
    /// # Errors
    ///
    /// Returns a stream failure if the configured confidence is outside
    /// [0, 1] or produces a non-finite coordinate.
    #[allow(clippy::cast_precision_loss)]
    pub fn frame(&self, index: usize) -> Result<PoseFrame, CaptureError> {
        let cfg = &self.config;
        let confidence = Confidence::new(cfg.confidence)
            .map_err(|e| CaptureError::stream_failed(e.to_string()))?;
        let progress = if cfg.frames > 0 {
            index as f64 / cfg.frames as f64
        } else {
            0.0
        };

        let keypoints = cfg
            .template
            .names()
            .iter()
            .enumerate()
            .map(|(k, name)| {
                let (bx, by) = base_position(name);
                let (dx, dy) = swing_offset(name, progress);
                let wobble = cfg.jitter * (index as f64 * 1.7 + k as f64 * 0.9).sin();
                Keypoint::new(bx + dx + cfg.offset + wobble, by + dy - wobble, confidence)
                    .map_err(|e| CaptureError::stream_failed(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let timestamp = if cfg.fps > 0.0 {
            index as f64 / cfg.fps * 1000.0
        } else {
            0.0
        };
        Ok(PoseFrame::new(keypoints, timestamp))
    }
}

impl Default for SyntheticProducer {
    fn default() -> Self {
        Self::new(SyntheticConfig::default())
    }
}

impl KeypointProducer for SyntheticProducer {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn expected_frames(&self) -> Option<usize> {
        Some(self.config.frames)
    }

    fn produce(&mut self, sink: &mut dyn FrameSink) -> Result<(), CaptureError> {
        if self.finished {
            return Err(CaptureError::AlreadyFinished);
        }
        self.finished = true;

        for index in 0..self.config.frames {
            if self.config.fail_after == Some(index) {
                let error = CaptureError::stream_failed(format!(
                    "synthetic failure after {index} frames"
                ));
                sink.on_error(error.clone());
                return Err(error);
            }
            match self.frame(index) {
                Ok(frame) => sink.on_frame(frame),
                Err(error) => {
                    sink.on_error(error.clone());
                    return Err(error);
                }
            }
        }
        sink.on_complete();
        Ok(())
    }
}

/// Resting position of a landmark on a front-facing standing figure.
fn base_position(name: &str) -> (f64, f64) {
    let (side, part) = match name.split_once('_') {
        Some(("left", part)) => (-1.0, part),
        Some(("right", part)) => (1.0, part),
        _ => (1.0, name),
    };
    let (half_width, y) = match part {
        "eye_inner" => (0.01, 0.10),
        "eye" => (0.02, 0.10),
        "eye_outer" => (0.03, 0.10),
        "ear" => (0.04, 0.11),
        "shoulder" => (0.08, 0.28),
        "elbow" => (0.12, 0.42),
        "wrist" => (0.15, 0.55),
        "pinky" | "index" | "thumb" => (0.16, 0.58),
        "hip" => (0.06, 0.58),
        "knee" => (0.08, 0.72),
        "ankle" => (0.10, 0.87),
        "heel" => (0.10, 0.89),
        "foot_index" => (0.11, 0.90),
        "mouth_left" => (-0.02, 0.15),
        "mouth_right" => (0.02, 0.15),
        _ => (0.0, 0.12),
    };
    (0.5 + side * half_width, y)
}

/// Displacement of a landmark at `progress` in [0, 1) through the swing.
fn swing_offset(name: &str, progress: f64) -> (f64, f64) {
    let lift = (progress * PI).sin();
    let sweep = (progress * PI * 2.0).sin();
    let arc = (progress * PI).cos();
    match name {
        "left_shoulder" => (0.0, lift * 0.06),
        "right_shoulder" => (arc * 0.03, lift * 0.08),
        "left_elbow" => (sweep * 0.08, arc * 0.06),
        "right_elbow" => (sweep * 0.12, arc * 0.10),
        "left_wrist" => (sweep * 0.10, arc * 0.08),
        "right_wrist" | "right_pinky" | "right_index" | "right_thumb" => {
            (sweep * 0.15, arc * 0.12)
        }
        _ => (0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::collect_sequence;
    use crate::error::CoreError;

    #[test]
    fn test_emits_configured_frames() {
        let mut producer = SyntheticProducer::new(SyntheticConfig {
            frames: 12,
            template: SkeletonTemplate::Coco17,
            ..SyntheticConfig::default()
        });

        let seq = collect_sequence(&mut producer, None).unwrap();
        assert_eq!(seq.len(), 12);
        assert!(seq.validate_against(SkeletonTemplate::Coco17).is_ok());
        assert!((seq.get(1).unwrap().timestamp - 1000.0 / 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_deterministic() {
        let cfg = SyntheticConfig {
            jitter: 0.01,
            ..SyntheticConfig::default()
        };
        let a = collect_sequence(&mut SyntheticProducer::new(cfg.clone()), None).unwrap();
        let b = collect_sequence(&mut SyntheticProducer::new(cfg), None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_failure_signal() {
        let mut producer = SyntheticProducer::new(SyntheticConfig {
            fail_after: Some(5),
            ..SyntheticConfig::default()
        });

        let err = collect_sequence(&mut producer, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Capture(CaptureError::StreamFailed { .. })
        ));
    }

    #[test]
    fn test_single_use() {
        let mut producer = SyntheticProducer::default();
        assert!(collect_sequence(&mut producer, None).is_ok());
        assert!(collect_sequence(&mut producer, None).is_err());
    }

    #[test]
    fn test_base_pose_is_mirrored() {
        let (lx, ly) = base_position("left_shoulder");
        let (rx, ry) = base_position("right_shoulder");
        assert!((lx + rx - 1.0).abs() < 1e-12);
        assert_eq!(ly, ry);
    }
}
