//! Per-segment routing cost, used to rank segments for rip-up (§4.2).

/// Weight on the violation-count term.
pub const ALPHA: f64 = 3.0;
/// Weight on the via-count term.
pub const BETA: f64 = 0.1;
/// Weight on the length-inflation term.
pub const GAMMA: f64 = 1.0;

/// A two-pin segment's fixed pin count, per the current implementation
/// (§4.2: "`num_pins=2`").
pub const NUM_PINS: f64 = 2.0;

/// Computes a segment's routing score: `α·violations + β·(vias −
/// num_pins) + γ·(length / max(1, manhattan))`.
///
/// Higher scores are worse. `vias` is always `0` in the current
/// implementation — the formula keeps the term so the original's intent
/// (penalize segments with excess via count relative to pin count) stays
/// legible even though nothing produces a nonzero `vias` yet.
pub fn segment_score(violations: usize, vias: usize, length: usize, manhattan: i64) -> f64 {
    let denom = manhattan.max(1) as f64;
    ALPHA * violations as f64 + BETA * (vias as f64 - NUM_PINS) + GAMMA * (length as f64 / denom)
}

/// Linearly rescales `scores` into `[norm_margin, 1 − norm_margin]`.
///
/// If every score is equal, every segment maps to the midpoint `0.5`. Per
/// §4.2's rip-up step: "Normalize segment scores... scaled linearly
/// against global min/max."
pub fn normalize(scores: &[f64], norm_margin: f64) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= f64::EPSILON {
        return vec![0.5; scores.len()];
    }
    let range = 1.0 - 2.0 * norm_margin;
    scores
        .iter()
        .map(|&s| norm_margin + range * (s - min) / span)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_zero_violations_reduces_to_length_term() {
        let s = segment_score(0, 0, 4, 4);
        assert!((s - (BETA * -NUM_PINS + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn score_increases_with_violations() {
        let low = segment_score(0, 0, 4, 4);
        let high = segment_score(1, 0, 4, 4);
        assert!(high > low);
    }

    #[test]
    fn normalize_constant_scores_map_to_midpoint() {
        let n = normalize(&[5.0, 5.0, 5.0], 0.1);
        assert!(n.iter().all(|&v| (v - 0.5).abs() < 1e-9));
    }

    #[test]
    fn normalize_respects_margin_bounds() {
        let n = normalize(&[0.0, 5.0, 10.0], 0.1);
        assert!((n[0] - 0.1).abs() < 1e-9);
        assert!((n[2] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert!(normalize(&[], 0.1).is_empty());
    }
}
