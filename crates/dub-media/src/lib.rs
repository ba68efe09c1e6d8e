#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for segment time-alignment and audio re-timing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with timeout and cancellation
//! - Audio duration probing via ffprobe
//! - Stretch-capability detection (rubberband vs atempo)
//! - The stretch planner and executor
//! - Timeline layout and rendering with silence fillers
//! - Concat-demuxer joining and video muxing
//! - The top-level `compose` entry point

pub mod capability;
pub mod command;
pub mod compose;
pub mod concat;
pub mod config;
pub mod error;
pub mod filters;
pub mod mux;
pub mod probe;
pub mod session;
pub mod stretch;
pub mod timeline;

pub use capability::StretchCapability;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compose::{compose, ComposeOutput, ComposeRequest};
pub use concat::concatenate_chunks;
pub use config::ComposeConfig;
pub use error::{MediaError, MediaResult};
pub use mux::mux_audio_onto_video;
pub use probe::{probe_audio, probe_duration, AudioInfo};
pub use session::ComposeSession;
pub use stretch::{apply_stretch, plan_stretch};
pub use timeline::{build_timeline, layout_timeline, TimelineSlot};
