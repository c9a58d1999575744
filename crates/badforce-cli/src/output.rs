//! Rendering of comparison results and skeleton listings.

use anyhow::Result;
use badforce_analysis::importance::SMASH_KEYPOINTS;
use badforce_analysis::{body_part_label, ComparisonResult, Language};
use badforce_core::{ShotType, SkeletonTemplate};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::report::{format_score, AnalysisResult, ScoreGrade};

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty table output
    #[default]
    Table,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

// ============================================================================
// Display rows
// ============================================================================

/// Detail metric row for tables
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

/// Keypoint row for tables
#[derive(Tabled)]
struct KeypointRow {
    #[tabled(rename = "Keypoint")]
    name: String,
    #[tabled(rename = "Body Part")]
    label: String,
    #[tabled(rename = "Score")]
    score: String,
}

/// Landmark row for the skeleton listing
#[derive(Tabled, Serialize)]
pub struct LandmarkRow {
    /// Frame position
    #[tabled(rename = "Index")]
    pub index: usize,
    /// Template landmark name
    #[tabled(rename = "Landmark")]
    pub landmark: String,
    /// Importance-set name compared at this position under positional matching
    #[tabled(rename = "Scored As")]
    pub scored_as: String,
}

/// JSON shape of a finished comparison.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    id: String,
    created_at: String,
    shot_type: ShotType,
    grade: ScoreGrade,
    frames: usize,
    #[serde(flatten)]
    comparison: &'a ComparisonResult,
}

// ============================================================================
// Comparison
// ============================================================================

fn detail_labels(language: Language) -> [&'static str; 3] {
    match language {
        Language::Korean => ["위치 정확도", "타이밍", "안정성"],
        Language::English => ["Position accuracy", "Timing", "Stability"],
    }
}

fn section_titles(language: Language) -> (&'static str, &'static str) {
    match language {
        Language::Korean => ("피드백", "추천 사항"),
        Language::English => ("Feedback", "Recommendations"),
    }
}

/// Prints a comparison in `format`.
pub fn print_comparison(
    analysis: &AnalysisResult,
    comparison: &ComparisonResult,
    shot_type: ShotType,
    language: Language,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = JsonReport {
                id: analysis.id.to_string(),
                created_at: analysis.created_at.to_rfc3339(),
                shot_type,
                grade: analysis.grade(),
                frames: analysis.pose_data.len(),
                comparison,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Compact => println!("{}", compact_line(comparison, shot_type)),
        OutputFormat::Table => print_comparison_table(analysis, comparison, shot_type, language),
    }
    Ok(())
}

/// Single-line `key=value` summary.
pub fn compact_line(comparison: &ComparisonResult, shot_type: ShotType) -> String {
    let d = &comparison.details;
    format!(
        "shot={} score={:.1} grade={} position={:.1} timing={:.1} stability={:.1} keypoints={}",
        shot_type,
        comparison.overall_score,
        ScoreGrade::from_score(comparison.overall_score).as_str(),
        d.position_accuracy,
        d.timing,
        d.stability,
        comparison.key_point_scores.len()
    )
}

fn print_comparison_table(
    analysis: &AnalysisResult,
    comparison: &ComparisonResult,
    shot_type: ShotType,
    language: Language,
) {
    let score = comparison.overall_score;
    println!(
        "{} {}",
        "BadForce Analysis".bold().cyan(),
        ScoreGrade::badge(score)
    );
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Analysis ID:".dimmed(), analysis.id);
    println!(
        "  {} {}",
        "Created:".dimmed(),
        analysis.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  {} {}", "Shot:".dimmed(), shot_type);
    println!("  {} {}", "Frames:".dimmed(), analysis.pose_data.len());
    println!(
        "  {} {} / 100",
        "Overall Score:".dimmed(),
        format_score(score).bold()
    );
    println!();

    let d = &comparison.details;
    let labels = detail_labels(language);
    let metrics: Vec<MetricRow> = labels
        .iter()
        .zip([d.position_accuracy, d.timing, d.stability])
        .map(|(label, value)| MetricRow {
            metric: (*label).to_string(),
            score: format_score(value),
            grade: ScoreGrade::from_score(value).as_str().to_string(),
        })
        .collect();
    let table = Table::new(metrics).with(Style::rounded()).to_string();
    println!("{table}");

    if !comparison.key_point_scores.is_empty() {
        let rows: Vec<KeypointRow> = comparison
            .key_point_scores
            .iter()
            .map(|(name, &value)| KeypointRow {
                name: name.clone(),
                label: body_part_label(name, language).to_string(),
                score: format_score(value),
            })
            .collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
    println!();

    let (feedback_title, recommendation_title) = section_titles(language);
    println!("{}", feedback_title.bold());
    for line in &comparison.feedback {
        println!("  • {line}");
    }
    if !comparison.recommendations.is_empty() {
        println!();
        println!("{}", recommendation_title.bold());
        for (i, line) in comparison.recommendations.iter().enumerate() {
            println!("  {}. {line}", i + 1);
        }
    }
}

// ============================================================================
// Skeleton
// ============================================================================

/// Rows describing every landmark of `template`.
pub fn landmark_rows(template: SkeletonTemplate) -> Vec<LandmarkRow> {
    template
        .names()
        .iter()
        .enumerate()
        .map(|(index, name)| LandmarkRow {
            index,
            landmark: (*name).to_string(),
            scored_as: SMASH_KEYPOINTS
                .get(index)
                .map_or_else(|| "-".to_string(), |s| (*s).to_string()),
        })
        .collect()
}

/// Prints the landmark listing of `template` in `format`.
pub fn print_skeleton(template: SkeletonTemplate, format: OutputFormat) -> Result<()> {
    let rows = landmark_rows(template);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Compact => {
            for row in &rows {
                println!("{} {} {}", row.index, row.landmark, row.scored_as);
            }
        }
        OutputFormat::Table => {
            println!(
                "{} ({} landmarks)",
                format!("{template:?} skeleton").bold().cyan(),
                template.len()
            );
            println!("{}", "=".repeat(60));
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{table}");
            println!(
                "{} With positional matching, position k is scored as the k-th smash keypoint.",
                "[INFO]".blue()
            );
        }
    }
    Ok(())
}
