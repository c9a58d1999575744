//! End-to-end tests for the comparison orchestrator.

use approx::assert_abs_diff_eq;
use badforce_analysis::{
    compare_poses, AnalysisError, ComparisonConfig, KeypointMatching, Language, PoseComparator,
};
use badforce_core::{Keypoint, PoseFrame, PoseSequence, ShotType, SkeletonTemplate};

/// Ten-keypoint frame with every point at (0.5, 0.5) except the overrides.
fn frame_with(overrides: &[(usize, f64, f64, f64)], t: f64) -> PoseFrame {
    let mut points = vec![Keypoint::from_raw(0.5, 0.5, 0.9).unwrap(); 10];
    for &(i, x, y, c) in overrides {
        points[i] = Keypoint::from_raw(x, y, c).unwrap();
    }
    PoseFrame::new(points, t)
}

fn repeat(frame: PoseFrame, n: usize) -> PoseSequence {
    (0..n)
        .map(|i| {
            let mut f = frame.clone();
            f.timestamp = i as f64 * 33.3;
            f
        })
        .collect()
}

/// A moving figure so that stability has real work to do.
fn moving(n: usize, dx: f64) -> PoseSequence {
    (0..n)
        .map(|i| {
            let x = 0.2 + i as f64 * 0.005 + dx;
            let points = (0..10)
                .map(|k| Keypoint::from_raw(x, 0.1 + k as f64 * 0.08, 0.95).unwrap())
                .collect();
            PoseFrame::new(points, i as f64 * 33.3)
        })
        .collect()
}

mod scenarios {
    use super::*;

    /// Only the right wrist (position 5) is reliable; it is shifted by 0.1.
    #[test]
    fn right_wrist_shift_scores_ninety() {
        let low: Vec<_> = (0..10).filter(|&i| i != 5).map(|i| (i, 0.5, 0.5, 0.1)).collect();

        let mut ref_over = low.clone();
        ref_over.push((5, 0.5, 0.5, 0.9));
        let mut user_over = low;
        user_over.push((5, 0.6, 0.5, 0.9));

        let reference = repeat(frame_with(&ref_over, 0.0), 3);
        let user = repeat(frame_with(&user_over, 0.0), 3);

        let result = compare_poses(&reference, &user, ShotType::Smash).unwrap();

        assert_eq!(result.key_point_scores.len(), 1);
        assert_abs_diff_eq!(result.key_point_scores["right_wrist"], 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.overall_score, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.details.position_accuracy, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_reference_is_invalid_input() {
        let user = repeat(frame_with(&[], 0.0), 3);
        let err = compare_poses(&PoseSequence::default(), &user, ShotType::Smash).unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        assert!(err.to_string().contains("Invalid pose data for comparison"));
    }

    #[test]
    fn identical_sequences_are_perfect() {
        let seq = moving(45, 0.0);
        let result = compare_poses(&seq, &seq, ShotType::Smash).unwrap();

        assert_abs_diff_eq!(result.overall_score, 100.0, epsilon = 1e-9);
        for score in result.key_point_scores.values() {
            assert_abs_diff_eq!(*score, 100.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(result.details.position_accuracy, 100.0, epsilon = 1e-9);
        assert_eq!(result.details.timing, 100.0);
        assert_abs_diff_eq!(result.details.stability, 100.0, epsilon = 1e-9);
        assert_eq!(result.feedback, vec!["🎯 훌륭합니다! 자세가 매우 정확합니다."]);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn two_frame_user_is_fully_stable() {
        let reference = moving(10, 0.0);
        let user: PoseSequence = vec![
            frame_with(&[(0, 0.0, 0.0, 0.9)], 0.0),
            frame_with(&[(0, 1.0, 1.0, 0.9)], 33.0),
        ]
        .into();

        let result = compare_poses(&reference, &user, ShotType::Clear).unwrap();
        assert_eq!(result.details.stability, 100.0);
    }
}

mod normalization {
    use super::*;

    #[test]
    fn long_clips_are_decimated_before_timing() {
        let reference = moving(240, 0.0);
        let user = moving(90, 0.0);
        let result = compare_poses(&reference, &user, ShotType::Smash).unwrap();

        // Both clips normalize to 60 frames.
        assert_eq!(result.details.timing, 100.0);
    }

    #[test]
    fn short_clip_keeps_length_mismatch() {
        let reference = moving(60, 0.0);
        let user = moving(30, 0.0);
        let result = compare_poses(&reference, &user, ShotType::Smash).unwrap();

        assert_abs_diff_eq!(result.details.timing, 50.0, epsilon = 1e-9);
        assert!(result.feedback.contains(&"⏱️ 동작의 타이밍을 개선해보세요.".to_string()));
        assert_eq!(
            result.recommendations.last().map(String::as_str),
            Some("기준 영상을 반복 시청하여 타이밍을 익히세요.")
        );
    }

    #[test]
    fn custom_target_frames() {
        let config = ComparisonConfig {
            target_frames: 30,
            ..ComparisonConfig::default()
        };
        let comparator = PoseComparator::new(config);
        let result = comparator
            .compare(&moving(90, 0.0), &moving(45, 0.0), ShotType::Smash)
            .unwrap();
        assert_eq!(result.details.timing, 100.0);
    }
}

mod shot_types {
    use super::*;

    #[test]
    fn importance_set_limits_scored_keypoints() {
        let seq = moving(5, 0.0);
        let clear = compare_poses(&seq, &seq, ShotType::Clear).unwrap();
        let serve = compare_poses(&seq, &seq, ShotType::Serve).unwrap();
        let net = compare_poses(&seq, &seq, ShotType::Net).unwrap();

        assert_eq!(clear.key_point_scores.len(), 6);
        assert_eq!(serve.key_point_scores.len(), 8);
        assert_eq!(net.key_point_scores.len(), 10);
    }

    #[test]
    fn position_accuracy_always_uses_smash_set() {
        // Hips and knees (positions 6..10) are far off; clear ignores them
        // for the overall score but position accuracy still counts them.
        let reference = repeat(frame_with(&[], 0.0), 3);
        let far: Vec<_> = (6..10).map(|i| (i, 0.5, 1.5, 0.9)).collect();
        let user = repeat(frame_with(&far, 0.0), 3);

        let result = compare_poses(&reference, &user, ShotType::Clear).unwrap();
        assert_abs_diff_eq!(result.overall_score, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.details.position_accuracy, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn keypoint_feedback_follows_importance_order() {
        let reference = repeat(frame_with(&[], 0.0), 3);
        let user = repeat(
            frame_with(&[(3, 0.5, 1.0, 0.9), (1, 0.5, 1.0, 0.9)], 0.0),
            3,
        );
        let result = compare_poses(&reference, &user, ShotType::Smash).unwrap();

        let notes: Vec<_> = result.feedback.iter().filter(|f| f.contains("위치를")).collect();
        assert_eq!(
            notes,
            vec!["오른쪽 어깨 위치를 확인해보세요.", "오른쪽 팔꿈치 위치를 확인해보세요."]
        );
        assert_eq!(
            result.recommendations,
            vec!["어깨를 더 높이 올려보세요.", "팔꿈치 각도를 조정해보세요."]
        );
    }
}

mod configuration {
    use super::*;

    #[test]
    fn english_output() {
        let comparator = PoseComparator::new(ComparisonConfig {
            language: Language::English,
            ..ComparisonConfig::default()
        });
        let seq = moving(5, 0.0);
        let result = comparator.compare(&seq, &seq, ShotType::Serve).unwrap();

        assert_eq!(result.feedback, vec!["🎯 Excellent! Your form is very accurate."]);
        assert_eq!(result.recommendations, vec!["Shift your weight forward when serving."]);
    }

    #[test]
    fn named_matching_changes_scores() {
        // COCO frames: left_shoulder is at index 5, not 0.
        let base: Vec<Keypoint> = (0..17)
            .map(|k| Keypoint::from_raw(0.3 + k as f64 * 0.02, 0.5, 0.9).unwrap())
            .collect();
        let mut shifted = base.clone();
        shifted[5] = Keypoint::from_raw(0.3 + 5.0 * 0.02, 0.7, 0.9).unwrap();

        let reference: PoseSequence = vec![PoseFrame::new(base, 0.0)].into();
        let user: PoseSequence = vec![PoseFrame::new(shifted, 0.0)].into();

        let positional = compare_poses(&reference, &user, ShotType::Clear).unwrap();
        let named = PoseComparator::new(ComparisonConfig {
            matching: KeypointMatching::Named(SkeletonTemplate::Coco17),
            ..ComparisonConfig::default()
        })
        .compare(&reference, &user, ShotType::Clear)
        .unwrap();

        assert_abs_diff_eq!(positional.key_point_scores["right_wrist"], 80.0, epsilon = 1e-9);
        assert_abs_diff_eq!(named.key_point_scores["left_shoulder"], 80.0, epsilon = 1e-9);
        assert_abs_diff_eq!(named.key_point_scores["right_shoulder"], 100.0, epsilon = 1e-9);
    }
}
