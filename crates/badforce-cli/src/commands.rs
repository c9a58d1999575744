//! Subcommand arguments and execution.
//!
//! - `compare`: score a user recording against a reference recording
//! - `simulate`: write a synthetic recording to a JSON file
//! - `demo`: run the full pipeline on two synthetic recordings
//! - `skeleton`: list the landmarks of a skeleton template

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use badforce_analysis::{AnalysisPipeline, ComparisonConfig, Language, PoseComparator};
use badforce_core::{
    collect_sequence, PoseSequence, ShotType, SkeletonTemplate, SyntheticConfig, SyntheticProducer,
};
use clap::{Args, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::output::{print_comparison, print_skeleton, OutputFormat};
use crate::report::AnalysisResult;

// ============================================================================
// Argument types
// ============================================================================

/// Feedback language argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageArg {
    /// Korean
    Ko,
    /// English
    En,
}

impl From<LanguageArg> for Language {
    fn from(val: LanguageArg) -> Self {
        match val {
            LanguageArg::Ko => Language::Korean,
            LanguageArg::En => Language::English,
        }
    }
}

/// Skeleton template argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemplateArg {
    /// MediaPipe / BlazePose, 33 landmarks
    #[default]
    Mediapipe,
    /// COCO, 17 keypoints
    Coco,
}

impl From<TemplateArg> for SkeletonTemplate {
    fn from(val: TemplateArg) -> Self {
        match val {
            TemplateArg::Mediapipe => SkeletonTemplate::MediaPipe33,
            TemplateArg::Coco => SkeletonTemplate::Coco17,
        }
    }
}

/// Options shared by every command that runs a comparison.
#[derive(Args, Debug, Clone, Default)]
pub struct ComparisonOptions {
    /// Shot type (smash, serve, clear, drop, net); unknown tags are scored as smash
    #[arg(short, long, default_value = "smash")]
    pub shot: String,

    /// Comparison config file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Feedback language, overrides the config file
    #[arg(short, long, value_enum)]
    pub language: Option<LanguageArg>,

    /// Normalization frame budget, overrides the config file
    #[arg(short = 't', long)]
    pub target_frames: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ComparisonOptions {
    /// Shot type, falling back to smash for unknown tags.
    pub fn shot_type(&self) -> ShotType {
        ShotType::from_tag_lossy(&self.shot)
    }

    /// Loads the config file (or defaults), applies flag overrides, validates.
    pub fn resolve_config(&self) -> Result<ComparisonConfig> {
        let mut config = match &self.config {
            Some(path) => ComparisonConfig::from_json(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ComparisonConfig::default(),
        };
        if let Some(language) = self.language {
            config.language = language.into();
        }
        if let Some(frames) = self.target_frames {
            config.target_frames = frames;
        }
        config.validate().context("Invalid comparison config")?;
        Ok(config)
    }
}

/// Arguments for the compare command
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference recording (JSON array of frames)
    #[arg(short, long)]
    pub reference: PathBuf,

    /// User recording (JSON array of frames)
    #[arg(short, long)]
    pub user: PathBuf,

    #[command(flatten)]
    pub options: ComparisonOptions,
}

/// Arguments for the simulate command
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of frames
    #[arg(short = 'n', long, default_value = "60")]
    pub frames: usize,

    /// Frame rate used for timestamps
    #[arg(long, default_value = "30.0")]
    pub fps: f64,

    /// Horizontal shift applied to every landmark
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    pub offset: f64,

    /// Amplitude of the per-frame wobble
    #[arg(short, long, default_value = "0.0")]
    pub jitter: f64,

    /// Confidence reported for every landmark (0.0-1.0)
    #[arg(long, default_value = "0.9")]
    pub confidence: f64,

    /// Skeleton template
    #[arg(short, long, value_enum, default_value = "mediapipe")]
    pub template: TemplateArg,

    /// Stamp every frame with this shot type
    #[arg(short, long)]
    pub shot: Option<String>,
}

/// Arguments for the demo command
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Frames in each synthetic recording
    #[arg(short = 'n', long, default_value = "60")]
    pub frames: usize,

    /// Horizontal shift of the user recording
    #[arg(long, default_value = "0.03", allow_negative_numbers = true)]
    pub offset: f64,

    /// Wobble amplitude of the user recording
    #[arg(short, long, default_value = "0.01")]
    pub jitter: f64,

    #[command(flatten)]
    pub options: ComparisonOptions,
}

/// Arguments for the skeleton command
#[derive(Args, Debug)]
pub struct SkeletonArgs {
    /// Skeleton template
    #[arg(short, long, value_enum, default_value = "mediapipe")]
    pub template: TemplateArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

// ============================================================================
// Helpers
// ============================================================================

/// Reads a recording from a JSON array of frames.
pub fn load_sequence(path: &Path) -> Result<PoseSequence> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let sequence: PoseSequence = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse pose frames in {}", path.display()))?;
    debug!(path = %path.display(), frames = sequence.len(), "Loaded recording");
    Ok(sequence)
}

/// Writes a recording as a pretty-printed JSON array of frames.
pub fn save_sequence(path: &Path, sequence: &PoseSequence) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(sequence)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// ============================================================================
// Command Execution
// ============================================================================

/// Execute the compare command
pub fn execute_compare(args: CompareArgs) -> Result<()> {
    let config = args.options.resolve_config()?;
    let shot_type = args.options.shot_type();

    let reference = load_sequence(&args.reference)?;
    let user = load_sequence(&args.user)?;

    let language = config.language;
    let comparator = PoseComparator::new(config);
    let comparison = comparator
        .compare(&reference, &user, shot_type)
        .context("Comparison failed")?;

    let analysis = AnalysisResult::new(user, &comparison);
    print_comparison(&analysis, &comparison, shot_type, language, args.options.format)
}

/// Execute the simulate command
pub fn execute_simulate(args: SimulateArgs) -> Result<()> {
    let shot_type = args.shot.as_deref().map(ShotType::from_tag_lossy);
    let mut producer = SyntheticProducer::new(SyntheticConfig {
        template: args.template.into(),
        frames: args.frames,
        fps: args.fps,
        offset: args.offset,
        jitter: args.jitter,
        confidence: args.confidence,
        fail_after: None,
    });

    let sequence =
        collect_sequence(&mut producer, shot_type).context("Synthetic capture failed")?;
    save_sequence(&args.output, &sequence)?;

    println!(
        "{} Wrote {} frames ({:.0} ms) to {}",
        "[OK]".green().bold(),
        sequence.len(),
        sequence.duration_ms(),
        args.output.display()
    );
    Ok(())
}

/// Execute the demo command
pub fn execute_demo(args: DemoArgs) -> Result<()> {
    let config = args.options.resolve_config()?;
    let shot_type = args.options.shot_type();
    let language = config.language;
    let interactive = args.options.format == OutputFormat::Table;

    let mut reference = SyntheticProducer::new(SyntheticConfig {
        frames: args.frames,
        ..SyntheticConfig::default()
    });
    let mut user = SyntheticProducer::new(SyntheticConfig {
        frames: args.frames,
        offset: args.offset,
        jitter: args.jitter,
        ..SyntheticConfig::default()
    });
    // Synthetic playback is deterministic, so an unstarted clone yields the
    // exact frames the pipeline will compare.
    let user_sequence = collect_sequence(&mut user.clone(), Some(shot_type))
        .context("Synthetic capture failed")?;

    let pb = if interactive {
        ProgressBar::new(100)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")?
            .progress_chars("#>-"),
    );

    let pipeline = AnalysisPipeline::new(config);
    let outcome = pipeline.run_with_progress(&mut reference, &mut user, shot_type, |p| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        pb.set_position(p.percent.round() as u64);
        pb.set_message(p.stage.label(language));
    });

    let comparison = match outcome {
        Ok(comparison) => {
            pb.finish();
            comparison
        }
        Err(e) => {
            pb.abandon();
            warn!(error = %e, "Demo pipeline failed");
            return Err(e).context("Analysis pipeline failed");
        }
    };
    if interactive {
        println!();
    }

    let analysis = AnalysisResult::new(user_sequence, &comparison);
    print_comparison(&analysis, &comparison, shot_type, language, args.options.format)
}

/// Execute the skeleton command
pub fn execute_skeleton(args: SkeletonArgs) -> Result<()> {
    print_skeleton(args.template.into(), args.format)
}
