//! Segment timeline layout and rendering.
//!
//! Layout is a pure cursor walk over the segment list; rendering
//! materializes each clip slot into a WAV chunk in the session
//! directory. Segments are handled strictly in order because each
//! silence gap depends on the cursor left by the previous segment.

use std::path::PathBuf;
use tracing::info;

use dub_models::{Segment, SegmentStats, TimelineChunk};

use crate::capability::StretchCapability;
use crate::config::ComposeConfig;
use crate::error::MediaResult;
use crate::session::ComposeSession;
use crate::stretch::apply_stretch;

/// One position in the output timeline, before rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineSlot {
    /// Filler silence of the given duration.
    Silence { duration: f64 },
    /// The re-timed clip for segment `index`, filling a `target`
    /// second window.
    Clip { index: usize, target: f64 },
}

impl TimelineSlot {
    /// Window duration this slot covers on the timeline.
    pub fn duration(&self) -> f64 {
        match self {
            TimelineSlot::Silence { duration } => *duration,
            TimelineSlot::Clip { target, .. } => *target,
        }
    }
}

/// Walk the segment list and lay out the full output timeline.
///
/// Emits a silence slot for every gap (before, between, and after
/// segments) so that slot durations sum exactly to `total_duration`
/// with no overlaps. Assumes the segment list has already been
/// validated as sorted and non-overlapping.
pub fn layout_timeline(segments: &[Segment], total_duration: f64) -> Vec<TimelineSlot> {
    let mut slots = Vec::with_capacity(segments.len() * 2 + 1);
    let mut current_time = 0.0_f64;

    for (index, seg) in segments.iter().enumerate() {
        if seg.start > current_time {
            slots.push(TimelineSlot::Silence {
                duration: seg.start - current_time,
            });
        }
        slots.push(TimelineSlot::Clip {
            index,
            target: seg.duration(),
        });
        current_time = seg.end;
    }

    if current_time < total_duration {
        slots.push(TimelineSlot::Silence {
            duration: total_duration - current_time,
        });
    }

    slots
}

/// Render the timeline for one composition.
///
/// Drives the duration probe and stretch executor per segment and
/// interleaves silence fillers, producing chunks in playback order
/// whose durations cover `total_duration` with no gaps.
pub async fn build_timeline(
    segments: &[Segment],
    clips: &[PathBuf],
    total_duration: f64,
    capability: StretchCapability,
    config: &ComposeConfig,
    session: &ComposeSession,
) -> MediaResult<(Vec<TimelineChunk>, Vec<SegmentStats>)> {
    let slots = layout_timeline(segments, total_duration);

    let mut chunks = Vec::with_capacity(slots.len());
    let mut stats = Vec::with_capacity(segments.len());

    for slot in &slots {
        match *slot {
            TimelineSlot::Silence { duration } => {
                chunks.push(TimelineChunk::Silence { duration });
            }

            TimelineSlot::Clip { index, target } => {
                let seg = &segments[index];
                info!(
                    "[Segment {}] {:.2}s - {:.2}s (target: {:.2}s)",
                    index, seg.start, seg.end, target
                );

                let output = session.adjusted_path(index);
                let adjusted = apply_stretch(
                    &clips[index],
                    target,
                    capability,
                    config,
                    session.dir(),
                    &output,
                )
                .await?;

                stats.push(SegmentStats {
                    index,
                    original: adjusted.actual_duration,
                    target,
                    final_duration: if adjusted.final_duration > 0.0 {
                        adjusted.final_duration
                    } else {
                        target
                    },
                    stretch_factor: adjusted.decision.factor,
                    was_adjusted: adjusted.decision.mode.is_adjusted(),
                });
                chunks.push(TimelineChunk::AdjustedAudio {
                    path: output,
                    duration: target,
                });
            }
        }
    }

    Ok((chunks, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations(slots: &[TimelineSlot]) -> Vec<f64> {
        slots.iter().map(TimelineSlot::duration).collect()
    }

    #[test]
    fn test_gaps_before_between_and_after() {
        let segments = vec![Segment::new(2.0, 5.0), Segment::new(7.0, 9.0)];
        let slots = layout_timeline(&segments, 12.0);

        assert_eq!(
            slots,
            vec![
                TimelineSlot::Silence { duration: 2.0 },
                TimelineSlot::Clip {
                    index: 0,
                    target: 3.0
                },
                TimelineSlot::Silence { duration: 2.0 },
                TimelineSlot::Clip {
                    index: 1,
                    target: 2.0
                },
                TimelineSlot::Silence { duration: 3.0 },
            ]
        );
        let total: f64 = durations(&slots).iter().sum();
        assert!((total - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_segments_is_one_silence() {
        let slots = layout_timeline(&[], 4.0);
        assert_eq!(slots, vec![TimelineSlot::Silence { duration: 4.0 }]);
    }

    #[test]
    fn test_abutting_segments_emit_no_silence() {
        let segments = vec![Segment::new(0.0, 2.0), Segment::new(2.0, 5.0)];
        let slots = layout_timeline(&segments, 5.0);
        assert_eq!(
            slots,
            vec![
                TimelineSlot::Clip {
                    index: 0,
                    target: 2.0
                },
                TimelineSlot::Clip {
                    index: 1,
                    target: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_segment_ending_at_total_emits_no_trailing_silence() {
        let segments = vec![Segment::new(1.0, 4.0)];
        let slots = layout_timeline(&segments, 4.0);
        assert_eq!(slots.len(), 2);
        assert!(matches!(slots[1], TimelineSlot::Clip { .. }));
    }

    #[test]
    fn test_slot_durations_always_sum_to_total() {
        let cases: Vec<(Vec<Segment>, f64)> = vec![
            (vec![], 7.5),
            (vec![Segment::new(0.0, 7.5)], 7.5),
            (vec![Segment::new(0.5, 1.0), Segment::new(1.0, 2.25)], 10.0),
            (
                vec![
                    Segment::new(0.25, 3.0),
                    Segment::new(4.5, 6.0),
                    Segment::new(6.0, 9.9),
                ],
                11.0,
            ),
        ];
        for (segments, total) in cases {
            let slots = layout_timeline(&segments, total);
            let sum: f64 = durations(&slots).iter().sum();
            assert!(
                (sum - total).abs() < 1e-9,
                "slots for {:?} sum to {} not {}",
                segments,
                sum,
                total
            );
        }
    }
}
