//! Sequence scorer: midpoint-weighted mean of per-frame scores.

use badforce_core::utils;

/// Weight of frame `index` in a list of `len` scores.
///
/// The weight is 1.0 at `len / 2` and tapers linearly to 0.5 at the ends.
#[inline]
#[must_use]
pub fn midpoint_weight(index: usize, len: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let mid = len as f64 / 2.0;
    if mid == 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let dist = (index as f64 - mid).abs() / mid;
    1.0 - dist * 0.5
}

/// Aggregates per-frame scores, favouring the middle of the clip.
///
/// Returns `Σ(score_i · w_i) / Σ(w_i)` with `w_i` from [`midpoint_weight`],
/// or 0 for an empty slice.
///
/// # Example
///
/// ```rust
/// use badforce_analysis::scoring::weighted_score;
///
/// assert_eq!(weighted_score(&[]), 0.0);
/// assert_eq!(weighted_score(&[72.5]), 72.5);
/// ```
#[must_use]
pub fn weighted_score(frame_scores: &[f64]) -> f64 {
    let len = frame_scores.len();
    let (weighted_sum, total_weight) = frame_scores
        .iter()
        .enumerate()
        .map(|(i, &score)| (score, midpoint_weight(i, len)))
        .fold((0.0, 0.0), |(sum, total), (score, w)| (sum + score * w, total + w));

    if total_weight > 0.0 {
        utils::clamp_score(weighted_sum / total_weight)
    } else {
        0.0
    }
}
