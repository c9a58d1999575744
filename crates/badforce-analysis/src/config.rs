//! Comparison configuration.
//!
//! [`ComparisonConfig`] gathers every tunable used by the comparison engine:
//! the normalization frame budget, the confidence cut-off, the keypoint
//! matching strategy, the feedback language, and the score thresholds that
//! drive feedback and recommendations. It is serializable via [`serde`] so it
//! can be stored to / restored from JSON files. Missing fields take their
//! defaults.
//!
//! # Example
//!
//! ```rust
//! use badforce_analysis::config::ComparisonConfig;
//!
//! let cfg = ComparisonConfig::default();
//! cfg.validate().expect("default config is valid");
//!
//! assert_eq!(cfg.target_frames, 60);
//! assert_eq!(cfg.confidence_threshold, 0.3);
//! ```

use std::path::Path;

use badforce_core::{CONFIDENCE_THRESHOLD, DEFAULT_TARGET_FRAMES, MAX_SCORE};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::feedback::Language;
use crate::importance::KeypointMatching;

// ---------------------------------------------------------------------------
// FeedbackThresholds
// ---------------------------------------------------------------------------

/// Score cut-offs (0-100) used by feedback and recommendation rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackThresholds {
    /// Position accuracy at or above this earns top-tier praise. Default: **80**.
    pub excellent: f64,
    /// Position accuracy at or above this earns encouragement. Default: **60**.
    pub good: f64,
    /// Timing below this adds a timing note. Default: **70**.
    pub timing: f64,
    /// Stability below this adds a stability note. Default: **70**.
    pub stability: f64,
    /// Keypoints scoring below this get a per-joint note. Default: **60**.
    pub weak_keypoint: f64,
    /// Smash shoulder/elbow advice fires below this. Default: **70**.
    pub joint_advice: f64,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        FeedbackThresholds {
            excellent: 80.0,
            good: 60.0,
            timing: 70.0,
            stability: 70.0,
            weak_keypoint: 60.0,
            joint_advice: 70.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonConfig
// ---------------------------------------------------------------------------

/// Complete configuration for one comparison engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Frame budget for timeline normalization. Default: **60**.
    pub target_frames: usize,

    /// A keypoint is scored only when its confidence is strictly above this
    /// value in every frame involved. Default: **0.3**.
    pub confidence_threshold: f64,

    /// Language of feedback and recommendation strings. Default: Korean.
    pub language: Language,

    /// How importance-set names are mapped onto frame positions.
    ///
    /// Default: [`KeypointMatching::Positional`].
    pub matching: KeypointMatching,

    /// Feedback and recommendation cut-offs.
    pub thresholds: FeedbackThresholds,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            target_frames: DEFAULT_TARGET_FRAMES,
            confidence_threshold: CONFIDENCE_THRESHOLD,
            language: Language::default(),
            matching: KeypointMatching::default(),
            thresholds: FeedbackThresholds::default(),
        }
    }
}

impl ComparisonConfig {
    /// Load a [`ComparisonConfig`] from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the file cannot be opened and
    /// [`ConfigError::InvalidValue`] if the JSON is malformed or fails
    /// validation.
    pub fn from_json(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: ComparisonConfig = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::invalid_value("(file)", e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize this configuration to pretty-printed JSON and write it to
    /// `path`, creating parent directories if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileRead`] if the directory cannot be created or
    /// the file cannot be written.
    pub fn to_json(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::FileRead {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("(serialization)", e.to_string()))?;
        std::fs::write(path, json).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    /// Validate all fields and return an error describing the first problem
    /// found, or `Ok(())` if the configuration is coherent.
    ///
    /// # Validated invariants
    ///
    /// - `target_frames` must be at least 1.
    /// - `confidence_threshold` must be in [0, 1).
    /// - Every feedback threshold must be in [0, 100].
    /// - `excellent` must not be below `good`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_frames == 0 {
            return Err(ConfigError::invalid_value("target_frames", "must be > 0"));
        }
        if !(0.0..1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::invalid_value(
                "confidence_threshold",
                "must be in [0.0, 1.0)",
            ));
        }

        let t = &self.thresholds;
        for (field, value) in [
            ("thresholds.excellent", t.excellent),
            ("thresholds.good", t.good),
            ("thresholds.timing", t.timing),
            ("thresholds.stability", t.stability),
            ("thresholds.weak_keypoint", t.weak_keypoint),
            ("thresholds.joint_advice", t.joint_advice),
        ] {
            if !(0.0..=MAX_SCORE).contains(&value) {
                return Err(ConfigError::invalid_value(field, "must be in [0, 100]"));
            }
        }
        if t.excellent < t.good {
            return Err(ConfigError::invalid_value(
                "thresholds.excellent",
                "must be >= thresholds.good",
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use badforce_core::SkeletonTemplate;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        let cfg = ComparisonConfig::default();
        cfg.validate().expect("default config should be valid");
    }

    #[test]
    fn json_round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.json");

        let original = ComparisonConfig {
            target_frames: 90,
            language: Language::English,
            matching: KeypointMatching::Named(SkeletonTemplate::Coco17),
            ..ComparisonConfig::default()
        };
        original.to_json(&path).expect("write succeeds");

        let loaded = ComparisonConfig::from_json(&path).expect("read succeeds");
        assert_eq!(loaded, original);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: ComparisonConfig =
            serde_json::from_str(r#"{ "target_frames": 30, "thresholds": { "timing": 50 } }"#)
                .unwrap();
        assert_eq!(cfg.target_frames, 30);
        assert_eq!(cfg.thresholds.timing, 50.0);
        assert_eq!(cfg.thresholds.stability, 70.0);
        assert_eq!(cfg.confidence_threshold, 0.3);
    }

    #[test]
    fn zero_target_frames_is_invalid() {
        let cfg = ComparisonConfig {
            target_frames: 0,
            ..ComparisonConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn threshold_out_of_range_is_invalid() {
        let mut cfg = ComparisonConfig::default();
        cfg.confidence_threshold = 1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = ComparisonConfig::default();
        cfg.thresholds.timing = 120.0;
        assert!(cfg.validate().is_err());

        let mut cfg = ComparisonConfig::default();
        cfg.thresholds.excellent = 50.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("absent.json");
        match ComparisonConfig::from_json(&path) {
            Err(ConfigError::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }
}
