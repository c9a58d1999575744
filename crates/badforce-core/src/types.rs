//! Core data types for the BadForce motion comparison system.
//!
//! This module defines the fundamental data structures used to represent a
//! captured motion: individual keypoints, frames of keypoints, and
//! time-ordered sequences of frames.
//!
//! # Type Categories
//!
//! - **Pose Types**: [`Keypoint`], [`PoseFrame`], [`PoseSequence`]
//! - **Common Types**: [`Confidence`], [`ShotType`], [`SkeletonTemplate`]
//!
//! # Positional identity
//!
//! A frame's keypoints carry no names. Position in the keypoint list *is* the
//! landmark's identity, and the order must follow one [`SkeletonTemplate`].

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Common Types
// =============================================================================

/// Detector confidence in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a finite number in [0.0, 1.0].
    pub fn new(value: f64) -> CoreResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns `true` if the confidence is strictly above `threshold`.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.0 > threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<f64> for Confidence {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

/// Badminton stroke being practised.
///
/// Selects the importance set used for scoring and the recommendation branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ShotType {
    /// Overhead smash
    #[default]
    Smash,
    /// Serve
    Serve,
    /// Overhead clear
    Clear,
    /// Drop shot
    Drop,
    /// Net shot
    Net,
}

impl ShotType {
    /// Returns all shot types in order.
    #[must_use]
    pub fn all() -> &'static [Self; 5] {
        &[Self::Smash, Self::Serve, Self::Clear, Self::Drop, Self::Net]
    }

    /// Returns the lowercase tag used on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smash => "smash",
            Self::Serve => "serve",
            Self::Clear => "clear",
            Self::Drop => "drop",
            Self::Net => "net",
        }
    }

    /// Parses a shot tag, falling back to [`ShotType::Smash`] for anything
    /// unrecognised.
    #[must_use]
    pub fn from_tag_lossy(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            tracing::warn!(tag, "Unrecognised shot type, falling back to smash");
            Self::Smash
        })
    }
}

impl FromStr for ShotType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smash" => Ok(Self::Smash),
            "serve" => Ok(Self::Serve),
            "clear" => Ok(Self::Clear),
            "drop" => Ok(Self::Drop),
            "net" => Ok(Self::Net),
            other => Err(CoreError::validation(format!("Unknown shot type: {other}"))),
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Skeleton Templates
// =============================================================================

const MEDIAPIPE_33: [&str; 33] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

const COCO_17: [&str; 17] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// Ordered landmark layout produced by a keypoint estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SkeletonTemplate {
    /// MediaPipe BlazePose, 33 landmarks
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "mediapipe"))]
    MediaPipe33,
    /// COCO, 17 keypoints
    #[cfg_attr(feature = "serde", serde(rename = "coco"))]
    Coco17,
}

impl SkeletonTemplate {
    /// Returns the landmark names in positional order.
    #[must_use]
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            Self::MediaPipe33 => &MEDIAPIPE_33,
            Self::Coco17 => &COCO_17,
        }
    }

    /// Returns the number of landmarks in a frame of this template.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names().len()
    }

    /// Always `false`; every template has landmarks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the position of `name` in this template.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names().iter().position(|candidate| *candidate == name)
    }

    /// Returns the landmark name stored at `index`.
    #[must_use]
    pub fn name_at(&self, index: usize) -> Option<&'static str> {
        self.names().get(index).copied()
    }
}

impl FromStr for SkeletonTemplate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mediapipe" | "mediapipe33" | "blazepose" => Ok(Self::MediaPipe33),
            "coco" | "coco17" => Ok(Self::Coco17),
            other => Err(CoreError::validation(format!(
                "Unknown skeleton template: {other}"
            ))),
        }
    }
}

// =============================================================================
// Pose Types
// =============================================================================

/// A single body landmark: normalized image-plane position plus confidence.
///
/// Coordinates are nominally in [0, 1]. Estimators report slightly
/// out-of-frame landmarks outside that range, so only finiteness is enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    x: f64,
    y: f64,
    confidence: Confidence,
}

impl Keypoint {
    /// Creates a new keypoint.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64, confidence: Confidence) -> CoreResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(CoreError::validation(format!(
                "Keypoint coordinates must be finite, got ({x}, {y})"
            )));
        }
        Ok(Self { x, y, confidence })
    }

    /// Creates a keypoint from raw numbers, validating the confidence too.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are not finite or the confidence
    /// is outside [0, 1].
    pub fn from_raw(x: f64, y: f64, confidence: f64) -> CoreResult<Self> {
        Self::new(x, y, Confidence::new(confidence)?)
    }

    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Detector confidence.
    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Returns `true` if the confidence is strictly above `threshold`.
    #[must_use]
    pub fn is_reliable(&self, threshold: f64) -> bool {
        self.confidence.exceeds(threshold)
    }

    /// Returns the 2D position as a tuple.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Calculates the Euclidean distance to another keypoint.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        crate::utils::euclidean_distance(self.position(), other.position())
    }
}

/// All keypoints observed at one instant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseFrame {
    /// Keypoints in skeleton-template order
    pub keypoints: Vec<Keypoint>,
    /// Milliseconds since the start of the sequence
    pub timestamp: f64,
    /// Shot the frame was captured for, if tagged
    #[cfg_attr(
        feature = "serde",
        serde(default, alias = "shotType", skip_serializing_if = "Option::is_none")
    )]
    pub shot_type: Option<ShotType>,
}

impl PoseFrame {
    /// Creates an untagged frame.
    #[must_use]
    pub fn new(keypoints: Vec<Keypoint>, timestamp: f64) -> Self {
        Self {
            keypoints,
            timestamp,
            shot_type: None,
        }
    }

    /// Returns this frame tagged with `shot_type`.
    #[must_use]
    pub fn with_shot_type(mut self, shot_type: ShotType) -> Self {
        self.shot_type = Some(shot_type);
        self
    }

    /// Number of keypoints in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    /// Returns `true` if the frame holds no keypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Keypoint at a template position.
    #[must_use]
    pub fn keypoint(&self, index: usize) -> Option<&Keypoint> {
        self.keypoints.get(index)
    }

    /// Checks that the frame has exactly as many keypoints as `template`.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the size mismatch.
    pub fn validate_against(&self, template: SkeletonTemplate) -> CoreResult<()> {
        if self.keypoints.len() != template.len() {
            return Err(CoreError::validation(format!(
                "Frame at {}ms has {} keypoints, template {:?} expects {}",
                self.timestamp,
                self.keypoints.len(),
                template,
                template.len()
            )));
        }
        Ok(())
    }
}

/// A time-ordered recording of one motion.
///
/// Frames are kept in the order they were captured; they are never re-sorted.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(transparent)
)]
pub struct PoseSequence {
    frames: Vec<PoseFrame>,
}

impl PoseSequence {
    /// Wraps captured frames.
    #[must_use]
    pub fn new(frames: Vec<PoseFrame>) -> Self {
        Self { frames }
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames as a slice.
    #[must_use]
    pub fn frames(&self) -> &[PoseFrame] {
        &self.frames
    }

    /// Frame at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PoseFrame> {
        self.frames.get(index)
    }

    /// Iterates frames in capture order.
    pub fn iter(&self) -> std::slice::Iter<'_, PoseFrame> {
        self.frames.iter()
    }

    /// Time between the first and the last frame, in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) if self.frames.len() > 1 => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }

    /// Consumes the sequence, returning its frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<PoseFrame> {
        self.frames
    }

    /// Checks every frame against `template`.
    ///
    /// # Errors
    ///
    /// Returns the first frame-size mismatch found.
    pub fn validate_against(&self, template: SkeletonTemplate) -> CoreResult<()> {
        self.frames
            .iter()
            .try_for_each(|frame| frame.validate_against(template))
    }
}

impl From<Vec<PoseFrame>> for PoseSequence {
    fn from(frames: Vec<PoseFrame>) -> Self {
        Self::new(frames)
    }
}

impl FromIterator<PoseFrame> for PoseSequence {
    fn from_iter<I: IntoIterator<Item = PoseFrame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PoseSequence {
    type Item = &'a PoseFrame;
    type IntoIter = std::slice::Iter<'a, PoseFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
