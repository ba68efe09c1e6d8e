//! Composition configuration.

use std::path::PathBuf;

/// Fixed output sample format shared by every chunk, so the concat
/// demuxer never has to resample across a join.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_CHANNELS: u32 = 2;

/// Tolerance ratio under which a clip counts as already fitting its
/// window (at most 5% over target). Stretching near-fitting clips
/// produces audible artifacts for no gain.
pub const FIT_TOLERANCE: f64 = 1.05;

/// Fade-out window applied when a stretched clip must be trimmed.
pub const FADE_DURATION: f64 = 0.15;

/// Configuration for one composition pipeline.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u32,
    /// Root directory for per-request session directories.
    pub work_dir: PathBuf,
    /// Per-transform timeout in seconds. `None` lets a transform run
    /// unbounded, matching the historical behavior.
    pub transform_timeout_secs: Option<u64>,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            work_dir: std::env::temp_dir().join("dub"),
            transform_timeout_secs: None,
        }
    }
}

impl ComposeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sample_rate: std::env::var("DUB_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.sample_rate),
            channels: std::env::var("DUB_CHANNELS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.channels),
            work_dir: std::env::var("DUB_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            transform_timeout_secs: std::env::var("DUB_TRANSFORM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComposeConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.channels, 2);
        assert_eq!(config.transform_timeout_secs, None);
    }
}
