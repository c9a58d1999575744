//! # BadForce Analysis
//!
//! This crate scores a user's badminton stroke against a reference recording
//! of the same stroke. It includes the comparison configuration, timeline
//! normalization, per-frame and per-sequence scoring, detail metrics,
//! localized feedback, and a staged pipeline that drives keypoint producers.
//!
//! ## Architecture
//!
//! ```text
//! KeypointProducer ×2 ──► AnalysisPipeline ──► ComparisonResult
//!                               │
//!                         PoseComparator (ComparisonConfig)
//!                               │
//!           ┌──────────┬────────┴───────┬──────────────┐
//!     normalize    FrameComparator   DetailMetrics   FeedbackGenerator
//!                       │
//!                 weighted_score
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use badforce_analysis::{compare_poses, ComparisonConfig};
//! use badforce_core::{Keypoint, PoseFrame, PoseSequence, ShotType};
//!
//! let config = ComparisonConfig::default();
//! config.validate().expect("config is valid");
//!
//! let at = |x: f64| PoseFrame::new(vec![Keypoint::from_raw(x, 0.5, 0.9).unwrap()], 0.0);
//! let reference: PoseSequence = vec![at(0.5); 3].into();
//! let user: PoseSequence = vec![at(0.6); 3].into();
//!
//! let result = compare_poses(&reference, &user, ShotType::Smash).unwrap();
//! assert!((result.overall_score - 90.0).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod comparison;
pub mod config;
pub mod error;
pub mod feedback;
pub mod frame;
pub mod importance;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod scoring;

// Convenient re-exports at the crate root.
pub use comparison::{compare_poses, ComparisonResult, PoseComparator};
pub use config::{ComparisonConfig, FeedbackThresholds};
pub use error::{AnalysisError, CompareResult, ConfigError};
pub use feedback::{body_part_label, generate_feedback, generate_recommendations, FeedbackGenerator, Language};
pub use frame::{compare_frames, FrameComparator, FrameComparison};
pub use importance::{importance_set, KeypointMatching};
pub use metrics::{position_accuracy, stability_score, timing_score, DetailMetrics};
pub use normalize::normalize_timeline;
pub use pipeline::{AnalysisPipeline, AnalysisProgress, AnalysisStage};
pub use scoring::weighted_score;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
