//! Error types for the BadForce motion comparison system.
//!
//! This module provides error handling using [`thiserror`] for automatic
//! `Display` and `Error` trait implementations.
//!
//! # Error Hierarchy
//!
//! - [`CoreError`]: Top-level error type for the core crate
//! - [`CaptureError`]: Failures of a keypoint producer's frame stream
//!
//! Low-confidence keypoints are *not* errors: they are silently excluded from
//! scoring by the analysis engine.
//!
//! # Example
//!
//! ```rust
//! use badforce_core::error::{CaptureError, CoreError};
//!
//! fn finish_capture() -> Result<(), CoreError> {
//!     Err(CaptureError::NoFrames.into())
//! }
//!
//! assert!(finish_capture().is_err());
//! ```

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the BadForce core.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Input that can never be compared, such as an empty sequence
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what made the input unusable
        message: String,
    },

    /// Validation error for a single value
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Keypoint capture error
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl CoreError {
    /// Creates a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if capturing again could make the operation succeed.
    ///
    /// Comparison itself is deterministic, so invalid input fails identically
    /// on every attempt.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Capture(e) => e.is_recoverable(),
            Self::InvalidInput { .. }
            | Self::Validation { .. }
            | Self::Configuration { .. }
            | Self::Internal { .. } => false,
        }
    }
}

/// Errors raised while materialising a keypoint producer's frame stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaptureError {
    /// The producer signalled a failure mid-stream
    #[error("Keypoint stream failed: {reason}")]
    StreamFailed {
        /// Reason reported by the producer
        reason: String,
    },

    /// The stream ended without a completion signal
    #[error("Keypoint stream incomplete after {received} frames")]
    Incomplete {
        /// Frames received before the stream stopped
        received: usize,
    },

    /// A producer was asked to stream again after finishing
    #[error("Keypoint stream already finished")]
    AlreadyFinished,

    /// The stream completed without delivering a single frame
    #[error("Keypoint stream completed without any frames")]
    NoFrames,
}

impl CaptureError {
    /// Creates a new stream failure.
    #[must_use]
    pub fn stream_failed(reason: impl Into<String>) -> Self {
        Self::StreamFailed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error is recoverable by capturing again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::StreamFailed { .. } | Self::Incomplete { .. } | Self::NoFrames => true,
            Self::AlreadyFinished => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let err = CoreError::invalid_input("reference sequence is empty");
        assert!(err.to_string().contains("Invalid input"));
        assert!(err.to_string().contains("reference sequence"));
    }

    #[test]
    fn test_capture_error_recoverable() {
        assert!(CaptureError::stream_failed("decoder crashed").is_recoverable());
        assert!(CaptureError::NoFrames.is_recoverable());
        assert!(!CaptureError::AlreadyFinished.is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let core_err: CoreError = CaptureError::Incomplete { received: 12 }.into();
        assert!(matches!(core_err, CoreError::Capture(_)));
        assert!(core_err.is_recoverable());
        assert!(core_err.to_string().contains("12 frames"));
    }

    #[test]
    fn test_invalid_input_not_recoverable() {
        assert!(!CoreError::invalid_input("empty").is_recoverable());
        assert!(!CoreError::validation("bad").is_recoverable());
    }
}
