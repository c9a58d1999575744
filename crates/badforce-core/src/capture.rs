//! Materialising a producer's frame stream into a [`PoseSequence`].
//!
//! The comparison core only accepts complete sequences. [`SequenceCollector`]
//! sits between a [`KeypointProducer`] and the core: it buffers frames,
//! tracks progress, and refuses to hand out a sequence unless the stream
//! completed cleanly with at least one frame.

use tracing::{debug, warn};

use crate::error::{CaptureError, CoreResult};
use crate::traits::{FrameSink, KeypointProducer};
use crate::types::{PoseFrame, PoseSequence, ShotType};

/// How far a capture has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureProgress {
    /// Frames received so far
    pub received: usize,
    /// Frames the producer announced, if any
    pub expected: Option<usize>,
    /// Whether the completion signal arrived
    pub complete: bool,
}

impl CaptureProgress {
    /// Completed fraction in [0, 1].
    ///
    /// Without an announced frame count the fraction stays at 0 until the
    /// stream completes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.complete {
            return 1.0;
        }
        match self.expected {
            Some(expected) if expected > 0 => {
                (self.received as f64 / expected as f64).min(1.0)
            }
            _ => 0.0,
        }
    }
}

#[derive(Debug)]
enum StreamState {
    Open,
    Completed,
    Failed(CaptureError),
}

/// A [`FrameSink`] that buffers a whole motion.
///
/// Frames are optionally stamped with the shot type being practised. Signals
/// that arrive after the stream has ended are ignored.
pub struct SequenceCollector<'a> {
    frames: Vec<PoseFrame>,
    shot_type: Option<ShotType>,
    expected: Option<usize>,
    state: StreamState,
    observer: Option<Box<dyn FnMut(CaptureProgress) + 'a>>,
}

impl<'a> SequenceCollector<'a> {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            shot_type: None,
            expected: None,
            state: StreamState::Open,
            observer: None,
        }
    }

    /// Tags every collected frame with `shot_type`.
    #[must_use]
    pub fn for_shot(mut self, shot_type: ShotType) -> Self {
        self.shot_type = Some(shot_type);
        self
    }

    /// Sets the frame count used for progress reporting.
    #[must_use]
    pub fn with_expected_frames(mut self, expected: Option<usize>) -> Self {
        if let Some(n) = expected {
            self.frames.reserve(n);
        }
        self.expected = expected;
        self
    }

    /// Calls `observer` after every frame and once on completion.
    #[must_use]
    pub fn on_progress(mut self, observer: impl FnMut(CaptureProgress) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Current progress.
    #[must_use]
    pub fn progress(&self) -> CaptureProgress {
        CaptureProgress {
            received: self.frames.len(),
            expected: self.expected,
            complete: matches!(self.state, StreamState::Completed),
        }
    }

    /// Returns `true` once a completion or failure signal has arrived.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self.state, StreamState::Open)
    }

    /// Hands out the collected sequence.
    ///
    /// # Errors
    ///
    /// - [`CaptureError::StreamFailed`] (or whatever the producer reported) if
    ///   the stream failed; the partial frames are discarded.
    /// - [`CaptureError::Incomplete`] if no completion signal arrived.
    /// - [`CaptureError::NoFrames`] if the stream completed empty.
    pub fn finish(self) -> CoreResult<PoseSequence> {
        match self.state {
            StreamState::Failed(error) => Err(error.into()),
            StreamState::Open => Err(CaptureError::Incomplete {
                received: self.frames.len(),
            }
            .into()),
            StreamState::Completed if self.frames.is_empty() => Err(CaptureError::NoFrames.into()),
            StreamState::Completed => Ok(PoseSequence::new(self.frames)),
        }
    }

    fn notify(&mut self) {
        let progress = self.progress();
        if let Some(observer) = self.observer.as_mut() {
            observer(progress);
        }
    }
}

impl Default for SequenceCollector<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SequenceCollector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceCollector")
            .field("frames", &self.frames.len())
            .field("shot_type", &self.shot_type)
            .field("expected", &self.expected)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl FrameSink for SequenceCollector<'_> {
    fn on_frame(&mut self, frame: PoseFrame) {
        if self.is_finished() {
            warn!(timestamp = frame.timestamp, "Ignoring frame delivered after end of stream");
            return;
        }
        let frame = match self.shot_type {
            Some(shot) => frame.with_shot_type(shot),
            None => frame,
        };
        self.frames.push(frame);
        self.notify();
    }

    fn on_complete(&mut self) {
        if self.is_finished() {
            warn!("Ignoring duplicate end-of-stream signal");
            return;
        }
        debug!(frames = self.frames.len(), "Keypoint stream complete");
        self.state = StreamState::Completed;
        self.notify();
    }

    fn on_error(&mut self, error: CaptureError) {
        if self.is_finished() {
            warn!(%error, "Ignoring failure signal after end of stream");
            return;
        }
        warn!(%error, discarded = self.frames.len(), "Keypoint stream failed");
        self.frames.clear();
        self.state = StreamState::Failed(error);
    }
}

/// Runs `producer` to completion and returns the captured sequence.
///
/// # Errors
///
/// Returns a capture error if the producer fails, never completes, or
/// completes without frames.
pub fn collect_sequence(
    producer: &mut dyn KeypointProducer,
    shot_type: Option<ShotType>,
) -> CoreResult<PoseSequence> {
    collect_sequence_with_progress(producer, shot_type, |_| {})
}

/// Like [`collect_sequence`], reporting progress after every frame.
///
/// # Errors
///
/// See [`collect_sequence`].
pub fn collect_sequence_with_progress<'a>(
    producer: &mut dyn KeypointProducer,
    shot_type: Option<ShotType>,
    observer: impl FnMut(CaptureProgress) + 'a,
) -> CoreResult<PoseSequence> {
    let mut collector = SequenceCollector::new()
        .with_expected_frames(producer.expected_frames())
        .on_progress(observer);
    if let Some(shot) = shot_type {
        collector = collector.for_shot(shot);
    }

    debug!(producer = producer.name(), "Collecting keypoint stream");
    producer.produce(&mut collector)?;
    collector.finish()
}
