//! Presentation-layer result types.
//!
//! [`AnalysisResult`] is the aggregate a front end keeps for one analysis:
//! the comparison outcome plus an identifier and a creation time, neither of
//! which the comparison engine knows about. [`ScoreGrade`] buckets scores
//! for colouring.

use badforce_analysis::ComparisonResult;
use badforce_core::PoseSequence;
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ScoreGrade
// ============================================================================

/// Colour band of a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    /// 80 and above.
    Excellent,
    /// 60 to below 80.
    Fair,
    /// Below 60.
    NeedsWork,
}

impl ScoreGrade {
    /// Grade of `score`.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreGrade::Excellent
        } else if score >= 60.0 {
            ScoreGrade::Fair
        } else {
            ScoreGrade::NeedsWork
        }
    }

    /// Emoji shown next to an overall score.
    pub fn badge(score: f64) -> &'static str {
        match score {
            s if s >= 90.0 => "🏆",
            s if s >= 80.0 => "🎯",
            s if s >= 70.0 => "👍",
            s if s >= 60.0 => "👌",
            _ => "💪",
        }
    }

    /// Short machine-friendly name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "excellent",
            ScoreGrade::Fair => "fair",
            ScoreGrade::NeedsWork => "needs_work",
        }
    }

    /// Colours `text` green, yellow or red.
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            ScoreGrade::Excellent => text.green(),
            ScoreGrade::Fair => text.yellow(),
            ScoreGrade::NeedsWork => text.red(),
        }
    }
}

/// Formats `score` with one decimal, coloured by grade.
pub fn format_score(score: f64) -> String {
    ScoreGrade::from_score(score)
        .paint(&format!("{score:.1}"))
        .to_string()
}

// ============================================================================
// AnalysisResult
// ============================================================================

/// One completed analysis as shown to and stored by a front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Unique identifier.
    pub id: Uuid,
    /// The user's captured motion.
    pub pose_data: PoseSequence,
    /// Overall score (0-100).
    pub score: f64,
    /// Feedback messages, in presentation order.
    pub feedback: Vec<String>,
    /// Recommendations, in presentation order.
    pub recommendations: Vec<String>,
    /// When the analysis finished.
    pub created_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Wraps a comparison of `user` with a fresh id and timestamp.
    pub fn new(user: PoseSequence, comparison: &ComparisonResult) -> Self {
        AnalysisResult {
            id: Uuid::new_v4(),
            pose_data: user,
            score: comparison.overall_score,
            feedback: comparison.feedback.clone(),
            recommendations: comparison.recommendations.clone(),
            created_at: Utc::now(),
        }
    }

    /// Grade of the overall score.
    pub fn grade(&self) -> ScoreGrade {
        ScoreGrade::from_score(self.score)
    }
}
