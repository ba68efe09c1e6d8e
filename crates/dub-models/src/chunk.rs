//! Ordered output units of the composed track.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unit of the output track, in playback order.
///
/// The concatenator only needs the ordered sequence and each chunk's
/// exact duration; chunks carry no cross-references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineChunk {
    /// Filler silence.
    Silence { duration: f64 },
    /// A re-timed clip, rendered to `path`.
    AdjustedAudio { path: PathBuf, duration: f64 },
}

impl TimelineChunk {
    /// Playable duration of this chunk in seconds.
    pub fn duration(&self) -> f64 {
        match self {
            TimelineChunk::Silence { duration } => *duration,
            TimelineChunk::AdjustedAudio { duration, .. } => *duration,
        }
    }

    /// Rendered file backing this chunk, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            TimelineChunk::Silence { .. } => None,
            TimelineChunk::AdjustedAudio { path, .. } => Some(path),
        }
    }
}

/// Sum of chunk durations in seconds.
pub fn total_duration(chunks: &[TimelineChunk]) -> f64 {
    chunks.iter().map(TimelineChunk::duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration() {
        let chunks = vec![
            TimelineChunk::Silence { duration: 2.0 },
            TimelineChunk::AdjustedAudio {
                path: PathBuf::from("a.wav"),
                duration: 3.0,
            },
            TimelineChunk::Silence { duration: 1.5 },
        ];
        assert!((total_duration(&chunks) - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_chunk_serde_shape() {
        let chunk = TimelineChunk::Silence { duration: 1.0 };
        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["kind"], "silence");
    }
}
