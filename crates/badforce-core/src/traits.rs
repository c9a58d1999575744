//! Core trait definitions for the BadForce system.
//!
//! These traits describe the boundary between a keypoint estimator and the
//! comparison core. The core never depends on how keypoints are estimated.
//!
//! # Traits
//!
//! - [`FrameSink`]: Receives a frame stream, one callback per frame, followed
//!   by exactly one completion or failure signal
//! - [`KeypointProducer`]: Streams the frames of one recorded motion into a
//!   [`FrameSink`]
//!
//! # Stream protocol
//!
//! ```text
//! on_frame* ( on_complete | on_error )
//! ```
//!
//! A producer calls [`FrameSink::on_frame`] zero or more times and then
//! signals the end of the stream exactly once. Nothing may follow the final
//! signal. After [`FrameSink::on_error`] the partial stream is discarded.

use crate::error::CaptureError;
use crate::types::PoseFrame;

/// Receiver side of a keypoint frame stream.
///
/// # Example
///
/// ```
/// use badforce_core::{CaptureError, FrameSink, PoseFrame};
///
/// #[derive(Default)]
/// struct Counter {
///     frames: usize,
///     done: bool,
/// }
///
/// impl FrameSink for Counter {
///     fn on_frame(&mut self, _frame: PoseFrame) {
///         self.frames += 1;
///     }
///
///     fn on_complete(&mut self) {
///         self.done = true;
///     }
///
///     fn on_error(&mut self, _error: CaptureError) {}
/// }
///
/// let mut counter = Counter::default();
/// counter.on_frame(PoseFrame::new(vec![], 0.0));
/// counter.on_complete();
/// assert_eq!(counter.frames, 1);
/// ```
pub trait FrameSink {
    /// Delivers one estimated frame.
    fn on_frame(&mut self, frame: PoseFrame);

    /// Signals that every frame has been delivered.
    fn on_complete(&mut self);

    /// Signals that the stream failed; frames delivered so far are invalid.
    fn on_error(&mut self, error: CaptureError);
}

/// A source of keypoint frames for one recorded motion.
///
/// Implementations wrap a concrete pose estimator (an on-device model, a
/// remote inference service, a recorded file) and must follow the stream
/// protocol described in the [module docs](self).
pub trait KeypointProducer {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Number of frames the producer expects to emit, when known.
    ///
    /// Used only for progress reporting.
    fn expected_frames(&self) -> Option<usize> {
        None
    }

    /// Streams every frame into `sink`, then signals completion or failure.
    ///
    /// # Errors
    ///
    /// Returns the same error that was passed to [`FrameSink::on_error`] when
    /// the stream fails.
    fn produce(&mut self, sink: &mut dyn FrameSink) -> Result<(), CaptureError>;
}
