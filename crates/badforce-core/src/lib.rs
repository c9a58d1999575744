//! # BadForce Core
//!
//! Core types, traits, and utilities for the BadForce motion comparison system.
//!
//! This crate provides the foundational building blocks shared by the analysis
//! engine and the command-line front end:
//!
//! - **Core Data Types**: [`Keypoint`], [`PoseFrame`], [`PoseSequence`],
//!   [`ShotType`] and [`SkeletonTemplate`] for representing captured motion.
//!
//! - **Error Types**: the [`error`] module, covering invalid input, validation
//!   and keypoint capture failures.
//!
//! - **Traits**: [`KeypointProducer`] and [`FrameSink`] define the contract
//!   between a keypoint estimator (whatever technology fills it in) and the
//!   comparison core.
//!
//! - **Capture**: [`SequenceCollector`] materialises a producer's frame stream
//!   into a [`PoseSequence`], and [`SyntheticProducer`] emits a deterministic
//!   motion for demos and tests.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use badforce_core::{Confidence, Keypoint, PoseFrame, PoseSequence};
//!
//! let keypoint = Keypoint::new(0.5, 0.3, Confidence::new(0.95).unwrap()).unwrap();
//! assert!(keypoint.is_reliable(badforce_core::CONFIDENCE_THRESHOLD));
//!
//! let sequence = PoseSequence::new(vec![PoseFrame::new(vec![keypoint], 0.0)]);
//! assert_eq!(sequence.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod capture;
pub mod error;
pub mod synthetic;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types at the crate root
pub use capture::{collect_sequence, CaptureProgress, SequenceCollector};
pub use error::{CaptureError, CoreError, CoreResult};
pub use synthetic::{SyntheticConfig, SyntheticProducer};
pub use traits::{FrameSink, KeypointProducer};
pub use types::{
    Confidence, Keypoint, PoseFrame, PoseSequence, ShotType, SkeletonTemplate,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keypoints at or below this confidence are excluded from every score.
pub const CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Default frame budget for timeline normalization.
pub const DEFAULT_TARGET_FRAMES: usize = 60;

/// Upper bound of every score produced by the comparison core.
pub const MAX_SCORE: f64 = 100.0;

/// Prelude module for convenient imports.
///
/// ```rust
/// use badforce_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::capture::{collect_sequence, CaptureProgress, SequenceCollector};
    pub use crate::error::{CaptureError, CoreError, CoreResult};
    pub use crate::traits::{FrameSink, KeypointProducer};
    pub use crate::types::{
        Confidence, Keypoint, PoseFrame, PoseSequence, ShotType, SkeletonTemplate,
    };
}
