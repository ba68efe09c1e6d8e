//! Shared data models for the dub re-timing engine.
//!
//! This crate provides Serde-serializable types for:
//! - Target-timeline segments and their validation
//! - Stretch decisions produced by the planner
//! - Ordered timeline chunks handed to the concatenator
//! - Per-segment processing stats and their summary

pub mod chunk;
pub mod segment;
pub mod stats;
pub mod stretch;

// Re-export common types
pub use chunk::TimelineChunk;
pub use segment::{validate_segments, Segment, SegmentListError};
pub use stats::{summarize, ProcessingSummary, SegmentStats};
pub use stretch::{StretchDecision, StretchMode};
