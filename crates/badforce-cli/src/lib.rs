//! BadForce CLI
//!
//! Command-line front end for badminton pose comparison: scores a user's
//! recorded motion against a reference recording and prints feedback.
//!
//! # Commands
//!
//! - **compare**: Score two recordings stored as JSON frame arrays
//! - **simulate**: Generate a synthetic recording
//! - **demo**: Run the full capture and comparison pipeline on synthetic input
//! - **skeleton**: List the landmarks of a skeleton template
//! - **version**: Display version information
//!
//! # Usage
//!
//! ```bash
//! # Produce a reference and a slightly shifted user recording
//! badforce simulate -o reference.json
//! badforce simulate -o user.json --offset 0.04 --jitter 0.01
//!
//! # Compare them, with English feedback
//! badforce compare -r reference.json -u user.json --shot clear -l en
//!
//! # Machine-readable output
//! badforce compare -r reference.json -u user.json -f json
//! ```

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;
pub mod report;

/// BadForce Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "badforce")]
#[command(author, version, about = "Badminton pose comparison and coaching feedback")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare a user recording against a reference recording
    Compare(commands::CompareArgs),

    /// Write a synthetic recording to a JSON file
    Simulate(commands::SimulateArgs),

    /// Run the analysis pipeline on synthetic recordings
    Demo(commands::DemoArgs),

    /// List the landmarks of a skeleton template
    Skeleton(commands::SkeletonArgs),

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{LanguageArg, TemplateArg};
    use crate::output::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from([
            "badforce", "compare", "-r", "ref.json", "-u", "user.json", "--shot", "serve", "-l",
            "en", "-f", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare(args) => {
                assert_eq!(args.reference.to_str(), Some("ref.json"));
                assert_eq!(args.user.to_str(), Some("user.json"));
                assert_eq!(args.options.shot, "serve");
                assert_eq!(args.options.language, Some(LanguageArg::En));
                assert_eq!(args.options.format, OutputFormat::Json);
                assert!(args.options.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn compare_requires_both_recordings() {
        assert!(Cli::try_parse_from(["badforce", "compare", "-r", "ref.json"]).is_err());
    }

    #[test]
    fn parse_simulate_defaults() {
        let cli = Cli::try_parse_from(["badforce", "simulate", "-o", "out.json"]).unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.frames, 60);
                assert_eq!(args.offset, 0.0);
                assert_eq!(args.confidence, 0.9);
                assert_eq!(args.template, TemplateArg::Mediapipe);
                assert!(args.shot.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_demo_negative_offset() {
        let cli = Cli::try_parse_from(["badforce", "demo", "--offset", "-0.05", "-f", "compact"])
            .unwrap();
        match cli.command {
            Commands::Demo(args) => {
                assert_eq!(args.offset, -0.05);
                assert_eq!(args.options.shot, "smash");
                assert_eq!(args.options.format, OutputFormat::Compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
