//! Per-segment processing stats and their summary.
//!
//! Pure reporting data: written once per segment, aggregated at the
//! end, never consulted for control flow.

use serde::{Deserialize, Serialize};

/// Record of how one segment was processed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Segment index in timeline order.
    pub index: usize,
    /// Probed duration of the source clip in seconds (0.0 = unknown).
    pub original: f64,
    /// Target window duration in seconds.
    pub target: f64,
    /// Realized duration of the adjusted clip in seconds.
    pub final_duration: f64,
    /// Tempo factor applied (1.0 = none).
    pub stretch_factor: f64,
    /// Whether a tempo adjustment was applied.
    pub was_adjusted: bool,
}

/// Aggregate of all segment stats for one composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub total_segments: usize,
    pub adjusted_count: usize,
    /// Sum of probed source durations in seconds.
    pub total_original: f64,
    /// Sum of realized durations in seconds.
    pub total_final: f64,
    /// Percent of source audio saved by compression, only present
    /// when the output is shorter than the input.
    pub compression_pct: Option<f64>,
}

/// Aggregate per-segment stats into a summary.
pub fn summarize(stats: &[SegmentStats]) -> ProcessingSummary {
    let total_original: f64 = stats.iter().map(|s| s.original).sum();
    let total_final: f64 = stats.iter().map(|s| s.final_duration).sum();
    let adjusted_count = stats.iter().filter(|s| s.was_adjusted).count();

    let compression_pct = if total_original > total_final {
        Some((1.0 - total_final / total_original) * 100.0)
    } else {
        None
    };

    ProcessingSummary {
        total_segments: stats.len(),
        adjusted_count,
        total_original,
        total_final,
        compression_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(original: f64, final_duration: f64, was_adjusted: bool) -> SegmentStats {
        SegmentStats {
            index: 0,
            original,
            target: final_duration,
            final_duration,
            stretch_factor: if was_adjusted { 1.3 } else { 1.0 },
            was_adjusted,
        }
    }

    #[test]
    fn test_summarize_with_compression() {
        let stats = vec![stat(10.0, 4.0, true), stat(3.0, 3.0, false)];
        let summary = summarize(&stats);

        assert_eq!(summary.total_segments, 2);
        assert_eq!(summary.adjusted_count, 1);
        assert!((summary.total_original - 13.0).abs() < 1e-9);
        assert!((summary.total_final - 7.0).abs() < 1e-9);
        let pct = summary.compression_pct.unwrap();
        assert!((pct - (1.0 - 7.0 / 13.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_no_compression() {
        let stats = vec![stat(2.0, 2.0, false)];
        let summary = summarize(&stats);
        assert_eq!(summary.adjusted_count, 0);
        assert_eq!(summary.compression_pct, None);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_segments, 0);
        assert_eq!(summary.compression_pct, None);
    }
}
