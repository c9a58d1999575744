//! Common numeric helpers for the BadForce system.
//!
//! Every aggregate in the comparison core resolves degenerate input (no
//! samples, non-finite values) to zero instead of NaN.

use crate::MAX_SCORE;

/// Calculates the Euclidean distance between two points.
#[must_use]
pub fn euclidean_distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let dx = p2.0 - p1.0;
    let dy = p2.1 - p1.1;
    dx.hypot(dy)
}

/// Clamps a score into [0, 100]. Non-finite scores become 0.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}

/// Converts a normalized-space displacement into a 0-100 score.
///
/// A displacement of 0.1 (a tenth of the frame) costs ten points.
#[must_use]
pub fn distance_to_score(distance: f64) -> f64 {
    clamp_score(MAX_SCORE - distance * MAX_SCORE)
}

/// Arithmetic mean, or 0 when `values` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_euclidean_distance() {
        assert_abs_diff_eq!(euclidean_distance((0.0, 0.0), (3.0, 4.0)), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.0), 42.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_distance_to_score() {
        assert_abs_diff_eq!(distance_to_score(0.0), 100.0);
        assert_abs_diff_eq!(distance_to_score(0.1), 90.0, epsilon = 1e-9);
        assert_eq!(distance_to_score(1.5), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_abs_diff_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
