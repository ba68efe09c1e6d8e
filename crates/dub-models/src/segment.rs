//! Target-timeline segments and segment-list validation.
//!
//! A segment is a half-open time window `[start, end)` on the target
//! timeline, in seconds. The timeline builder assumes segments arrive
//! sorted by start and non-overlapping; `validate_segments` enforces
//! that up front so a bad caller gets a typed error instead of a
//! corrupted timeline (negative silence, inconsistent cursor).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A time window on the target timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (exclusive, must be greater than start).
    pub end: f64,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Errors from validating a segment list against its clip list.
#[derive(Debug, Error, PartialEq)]
pub enum SegmentListError {
    #[error("segment {index} has non-positive duration ({start:.3}s - {end:.3}s)")]
    EmptySegment { index: usize, start: f64, end: f64 },

    #[error("segment {index} starts at {start:.3}s, before 0")]
    NegativeStart { index: usize, start: f64 },

    #[error("segment {index} starts at {start:.3}s, before previous segment ends at {prev_end:.3}s")]
    OutOfOrder {
        index: usize,
        start: f64,
        prev_end: f64,
    },

    #[error("{segments} segments supplied but {clips} audio clips")]
    ClipCountMismatch { segments: usize, clips: usize },

    #[error("total duration {total:.3}s is shorter than last segment end {last_end:.3}s")]
    TotalTooShort { total: f64, last_end: f64 },
}

/// Validate that segments are sorted, non-overlapping, in-range, and
/// matched one-to-one with audio clips.
///
/// Returns the first violation found, in timeline order.
pub fn validate_segments(
    segments: &[Segment],
    clip_count: usize,
    total_duration: f64,
) -> Result<(), SegmentListError> {
    if segments.len() != clip_count {
        return Err(SegmentListError::ClipCountMismatch {
            segments: segments.len(),
            clips: clip_count,
        });
    }

    let mut prev_end = 0.0_f64;
    for (index, seg) in segments.iter().enumerate() {
        if seg.start < 0.0 {
            return Err(SegmentListError::NegativeStart {
                index,
                start: seg.start,
            });
        }
        if seg.end <= seg.start {
            return Err(SegmentListError::EmptySegment {
                index,
                start: seg.start,
                end: seg.end,
            });
        }
        if index > 0 && seg.start < prev_end {
            return Err(SegmentListError::OutOfOrder {
                index,
                start: seg.start,
                prev_end,
            });
        }
        prev_end = seg.end;
    }

    if let Some(last) = segments.last() {
        if total_duration < last.end {
            return Err(SegmentListError::TotalTooShort {
                total: total_duration,
                last_end: last.end,
            });
        }
    }

    Ok(())
}
