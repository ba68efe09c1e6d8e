//! Stretch decisions produced by the planner.

use serde::{Deserialize, Serialize};

/// How a clip is adjusted to fit its target window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StretchMode {
    /// Duration unknown or target degenerate: normalize-only copy,
    /// no timing guarantee.
    None,
    /// Clip already fits (within tolerance): pad with trailing silence
    /// to exactly the target duration.
    Pad,
    /// Time-stretch reaches the target: pad the stretched result to
    /// exactly the target duration.
    StretchPad,
    /// The stretch ceiling was insufficient: trim to the target and
    /// fade out instead of a hard cut.
    StretchFade,
}

impl StretchMode {
    /// Whether this mode involved a tempo adjustment.
    pub fn is_adjusted(&self) -> bool {
        matches!(self, StretchMode::StretchPad | StretchMode::StretchFade)
    }
}

/// The planner's decision for one segment. Computed once, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StretchDecision {
    /// Tempo factor to apply (>= 1.0; 1.0 means no stretch).
    pub factor: f64,
    /// Adjustment mode.
    pub mode: StretchMode,
    /// Expected playable duration of the adjusted clip in seconds.
    /// Never exceeds the target window except in `None` mode, where
    /// no guarantee is made.
    pub final_duration: f64,
}
