//! Error types for the BadForce analysis engine.
//!
//! ## Hierarchy
//!
//! ```text
//! AnalysisError (top-level)
//! ├── InvalidInput   (empty reference or user sequence)
//! ├── ConfigError    (config validation / file loading)
//! ├── CoreError      (capture failures surfaced by the pipeline)
//! └── serde_json     (ComparisonResult JSON text)
//! ```

use std::path::PathBuf;

use badforce_core::CoreError;
use thiserror::Error;

/// Convenient `Result` alias used by orchestration-level functions.
pub type CompareResult<T> = Result<T, AnalysisError>;

/// Top-level error type for the analysis engine.
///
/// Raised before any scoring starts; a comparison either completes or
/// produces no result at all.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// One of the sequences cannot be compared.
    #[error("Invalid pose data for comparison: {0}")]
    InvalidInput(String),

    /// A configuration validation or loading error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error reported by the core crate, such as a failed capture.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Construct an [`AnalysisError::InvalidInput`].
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        AnalysisError::InvalidInput(msg.into())
    }

    /// Returns `true` for errors caused by unusable pose data.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidInput(_) | AnalysisError::Core(CoreError::InvalidInput { .. })
        )
    }
}

/// Errors produced when loading or validating a [`ComparisonConfig`].
///
/// [`ComparisonConfig`]: crate::config::ComparisonConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has an invalid value.
    #[error("Invalid value for field `{field}`: {reason}")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A configuration file could not be read or written.
    #[error("Cannot access config file {path:?}: {source}")]
    FileRead {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Construct a [`ConfigError::InvalidValue`].
    pub fn invalid_value<S: Into<String>>(field: &'static str, reason: S) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
