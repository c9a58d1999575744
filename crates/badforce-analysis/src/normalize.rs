//! Timeline normalization.
//!
//! Long captures are decimated down to a fixed frame budget by picking the
//! nearest-previous source frame for each output slot. Frames are copied,
//! never interpolated. Sequences already within budget pass through
//! untouched, so two captures of different native length may still differ in
//! length afterwards; every consumer truncates to the shorter one.

use badforce_core::PoseSequence;
use tracing::debug;

/// Decimates `sequence` to at most `target_len` frames.
///
/// For `len > target_len`, output frame `i` is source frame
/// `floor(i * len / target_len)`. A `target_len` of zero leaves the sequence
/// unchanged.
#[must_use]
pub fn normalize_timeline(sequence: &PoseSequence, target_len: usize) -> PoseSequence {
    let len = sequence.len();
    if target_len == 0 || len <= target_len {
        return sequence.clone();
    }

    debug!(from = len, to = target_len, "Decimating pose sequence");
    (0..target_len)
        .filter_map(|i| sequence.get(i * len / target_len).cloned())
        .collect()
}
