//! Importance sets: the keypoints that are diagnostic for each shot.
//!
//! # Positional matching
//!
//! Frames carry no landmark names. By default the `k`-th name of an
//! importance set is scored against keypoint `k` of each frame. That is only
//! anatomically right when the importance set is ordered exactly like the
//! prefix of the skeleton template the producer emits. Scores depend on this
//! coupling, so [`KeypointMatching::Positional`] stays the default.
//! [`KeypointMatching::Named`] is an explicit opt-in that resolves each name
//! through a [`SkeletonTemplate`] and therefore produces different scores.

use badforce_core::{ShotType, SkeletonTemplate};
use serde::{Deserialize, Serialize};

/// Upper body plus hips and knees.
pub const SMASH_KEYPOINTS: [&str; 10] = [
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
];

/// Upper body plus hips.
pub const SERVE_KEYPOINTS: [&str; 8] = [
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
];

/// Arms and shoulders only.
pub const CLEAR_KEYPOINTS: [&str; 6] = [
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
];

/// Returns the importance set for `shot`.
///
/// Drop and net shots have no dedicated set and use the smash set.
#[must_use]
pub fn importance_set(shot: ShotType) -> &'static [&'static str] {
    match shot {
        ShotType::Serve => &SERVE_KEYPOINTS,
        ShotType::Clear => &CLEAR_KEYPOINTS,
        ShotType::Smash | ShotType::Drop | ShotType::Net => &SMASH_KEYPOINTS,
    }
}

/// Strategy for locating an importance-set name inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypointMatching {
    /// Name `k` of the importance set is keypoint `k` of the frame.
    #[default]
    Positional,
    /// Name is looked up in the template; names it lacks are skipped.
    Named(SkeletonTemplate),
}

impl KeypointMatching {
    /// Frame position scored for the importance-set entry `name` at `rank`.
    #[must_use]
    pub fn resolve(&self, rank: usize, name: &str) -> Option<usize> {
        match self {
            KeypointMatching::Positional => Some(rank),
            KeypointMatching::Named(template) => template.index_of(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_sizes() {
        assert_eq!(importance_set(ShotType::Smash).len(), 10);
        assert_eq!(importance_set(ShotType::Serve).len(), 8);
        assert_eq!(importance_set(ShotType::Clear).len(), 6);
    }

    #[test]
    fn drop_and_net_fall_back_to_smash() {
        assert_eq!(importance_set(ShotType::Drop), importance_set(ShotType::Smash));
        assert_eq!(importance_set(ShotType::Net), importance_set(ShotType::Smash));
    }

    #[test]
    fn smaller_sets_are_prefixes_of_smash() {
        for shot in [ShotType::Serve, ShotType::Clear] {
            let set = importance_set(shot);
            assert_eq!(set, &SMASH_KEYPOINTS[..set.len()]);
        }
    }

    #[test]
    fn positional_resolution_uses_rank() {
        assert_eq!(KeypointMatching::Positional.resolve(5, "right_wrist"), Some(5));
    }

    #[test]
    fn named_resolution_uses_template() {
        let coco = KeypointMatching::Named(SkeletonTemplate::Coco17);
        assert_eq!(coco.resolve(5, "right_wrist"), Some(10));

        let mediapipe = KeypointMatching::Named(SkeletonTemplate::MediaPipe33);
        assert_eq!(mediapipe.resolve(0, "left_shoulder"), Some(11));
        assert_eq!(mediapipe.resolve(0, "racket_tip"), None);
    }

    #[test]
    fn matching_serde() {
        let json = serde_json::to_string(&KeypointMatching::Named(SkeletonTemplate::Coco17)).unwrap();
        assert_eq!(json, r#"{"named":"coco"}"#);
        let back: KeypointMatching = serde_json::from_str(r#""positional""#).unwrap();
        assert_eq!(back, KeypointMatching::Positional);
    }
}
