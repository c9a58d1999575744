//! Feedback and recommendation generation.
//!
//! Both generators are pure functions of the per-keypoint scores, the detail
//! metrics and the shot type. Output order is presentation order.
//!
//! Feedback:
//! 1. a tier message chosen by position accuracy,
//! 2. a timing note when timing is low,
//! 3. a stability note when stability is low,
//! 4. one note per weak keypoint, in score-map order.
//!
//! Recommendations start with shot-specific advice (smash, serve and clear
//! only) followed by general stability and timing advice.

use std::fmt;
use std::str::FromStr;

use badforce_core::ShotType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::FeedbackThresholds;
use crate::metrics::DetailMetrics;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Language of every user-facing string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Korean (`ko`).
    #[default]
    #[serde(rename = "ko", alias = "korean")]
    Korean,
    /// English (`en`).
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Language {
    /// Two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
        }
    }

    fn catalog(self) -> &'static Catalog {
        match self {
            Language::Korean => &KOREAN,
            Language::English => &ENGLISH,
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Language::Korean),
            "en" | "english" => Ok(Language::English),
            other => Err(format!("unknown language '{other}' (expected ko or en)")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Message catalogs
// ---------------------------------------------------------------------------

struct Catalog {
    excellent: &'static str,
    good: &'static str,
    needs_practice: &'static str,
    timing_note: &'static str,
    stability_note: &'static str,
    check_position: fn(&str) -> String,
    smash_shoulder: &'static str,
    smash_elbow: &'static str,
    serve: &'static str,
    clear: &'static str,
    practice_slowly: &'static str,
    rewatch_reference: &'static str,
}

static KOREAN: Catalog = Catalog {
    excellent: "🎯 훌륭합니다! 자세가 매우 정확합니다.",
    good: "👍 좋은 자세입니다. 조금만 더 정확하게!",
    needs_practice: "💪 자세 연습이 더 필요합니다.",
    timing_note: "⏱️ 동작의 타이밍을 개선해보세요.",
    stability_note: "🧘‍♂️ 동작을 더 안정적으로 수행해보세요.",
    check_position: check_position_ko,
    smash_shoulder: "어깨를 더 높이 올려보세요.",
    smash_elbow: "팔꿈치 각도를 조정해보세요.",
    serve: "서브 시 무게중심을 앞으로 이동하세요.",
    clear: "클리어 시 라켓을 완전히 뒤로 빼세요.",
    practice_slowly: "천천히 동작을 연습하여 안정성을 높이세요.",
    rewatch_reference: "기준 영상을 반복 시청하여 타이밍을 익히세요.",
};

static ENGLISH: Catalog = Catalog {
    excellent: "🎯 Excellent! Your form is very accurate.",
    good: "👍 Good form. Just a little more precision!",
    needs_practice: "💪 Your form needs more practice.",
    timing_note: "⏱️ Try to improve the timing of the motion.",
    stability_note: "🧘‍♂️ Try to perform the motion more steadily.",
    check_position: check_position_en,
    smash_shoulder: "Raise your shoulder higher.",
    smash_elbow: "Adjust your elbow angle.",
    serve: "Shift your weight forward when serving.",
    clear: "Take the racket all the way back on a clear.",
    practice_slowly: "Practise the motion slowly to build stability.",
    rewatch_reference: "Watch the reference video repeatedly to learn the timing.",
};

fn check_position_ko(label: &str) -> String {
    format!("{label} 위치를 확인해보세요.")
}

fn check_position_en(label: &str) -> String {
    format!("Check your {label} position.")
}

/// (keypoint, Korean label, English label)
const BODY_PART_LABELS: [(&str, &str, &str); 10] = [
    ("left_shoulder", "왼쪽 어깨", "left shoulder"),
    ("right_shoulder", "오른쪽 어깨", "right shoulder"),
    ("left_elbow", "왼쪽 팔꿈치", "left elbow"),
    ("right_elbow", "오른쪽 팔꿈치", "right elbow"),
    ("left_wrist", "왼쪽 손목", "left wrist"),
    ("right_wrist", "오른쪽 손목", "right wrist"),
    ("left_hip", "왼쪽 엉덩이", "left hip"),
    ("right_hip", "오른쪽 엉덩이", "right hip"),
    ("left_knee", "왼쪽 무릎", "left knee"),
    ("right_knee", "오른쪽 무릎", "right knee"),
];

/// Human-readable label for a keypoint name.
///
/// Names outside the translation table are returned unchanged.
///
/// ```rust
/// use badforce_analysis::feedback::{body_part_label, Language};
///
/// assert_eq!(body_part_label("right_elbow", Language::Korean), "오른쪽 팔꿈치");
/// assert_eq!(body_part_label("nose", Language::English), "nose");
/// ```
pub fn body_part_label(name: &str, language: Language) -> &str {
    BODY_PART_LABELS
        .iter()
        .find(|(key, _, _)| *key == name)
        .map_or(name, |&(_, ko, en)| match language {
            Language::Korean => ko,
            Language::English => en,
        })
}

// ---------------------------------------------------------------------------
// FeedbackGenerator
// ---------------------------------------------------------------------------

/// Turns scores into feedback and recommendation lists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeedbackGenerator {
    thresholds: FeedbackThresholds,
    language: Language,
}

impl FeedbackGenerator {
    /// Creates a generator.
    pub fn new(thresholds: FeedbackThresholds, language: Language) -> Self {
        FeedbackGenerator {
            thresholds,
            language,
        }
    }

    /// Language in use.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Builds the feedback list.
    pub fn feedback(
        &self,
        key_point_scores: &IndexMap<String, f64>,
        details: &DetailMetrics,
    ) -> Vec<String> {
        let t = &self.thresholds;
        let msg = self.language.catalog();
        let mut feedback = Vec::new();

        let tier = if details.position_accuracy >= t.excellent {
            msg.excellent
        } else if details.position_accuracy >= t.good {
            msg.good
        } else {
            msg.needs_practice
        };
        feedback.push(tier.to_string());

        if details.timing < t.timing {
            feedback.push(msg.timing_note.to_string());
        }
        if details.stability < t.stability {
            feedback.push(msg.stability_note.to_string());
        }

        feedback.extend(
            key_point_scores
                .iter()
                .filter(|(_, &score)| score < t.weak_keypoint)
                .map(|(name, _)| (msg.check_position)(body_part_label(name, self.language))),
        );
        feedback
    }

    /// Builds the recommendation list.
    pub fn recommendations(
        &self,
        key_point_scores: &IndexMap<String, f64>,
        details: &DetailMetrics,
        shot_type: ShotType,
    ) -> Vec<String> {
        let t = &self.thresholds;
        let msg = self.language.catalog();
        let mut recommendations = Vec::new();

        // A joint scoring exactly 0 gets no advice, same as an absent one.
        let needs_advice = |name: &str| {
            key_point_scores
                .get(name)
                .is_some_and(|&score| score != 0.0 && score < t.joint_advice)
        };

        match shot_type {
            ShotType::Smash => {
                if needs_advice("right_shoulder") {
                    recommendations.push(msg.smash_shoulder.to_string());
                }
                if needs_advice("right_elbow") {
                    recommendations.push(msg.smash_elbow.to_string());
                }
            }
            ShotType::Serve => recommendations.push(msg.serve.to_string()),
            ShotType::Clear => recommendations.push(msg.clear.to_string()),
            ShotType::Drop | ShotType::Net => {}
        }

        if details.stability < t.stability {
            recommendations.push(msg.practice_slowly.to_string());
        }
        if details.timing < t.timing {
            recommendations.push(msg.rewatch_reference.to_string());
        }
        recommendations
    }
}

/// Feedback with default thresholds, in Korean.
pub fn generate_feedback(key_point_scores: &IndexMap<String, f64>, details: &DetailMetrics) -> Vec<String> {
    FeedbackGenerator::default().feedback(key_point_scores, details)
}

/// Recommendations with default thresholds, in Korean.
pub fn generate_recommendations(
    key_point_scores: &IndexMap<String, f64>,
    details: &DetailMetrics,
    shot_type: ShotType,
) -> Vec<String> {
    FeedbackGenerator::default().recommendations(key_point_scores, details, shot_type)
}
