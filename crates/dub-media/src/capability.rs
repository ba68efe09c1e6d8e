//! Stretch-capability detection.
//!
//! FFmpeg builds differ in whether the pitch-preserving `rubberband`
//! filter is compiled in. Detected once at process start and passed
//! around as an explicit value so planner behavior stays a pure
//! function of its inputs.

use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

/// Maximum pitch-preserving stretch (rubberband).
pub const MAX_RUBBERBAND_STRETCH: f64 = 1.3;

/// Maximum atempo stretch (fallback, affects pitch).
pub const MAX_ATEMPO_FALLBACK: f64 = 2.0;

/// Which time-stretch algorithm the local FFmpeg build offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchCapability {
    /// Whether the pitch-preserving rubberband filter is available.
    pub pitch_preserving: bool,
}

impl StretchCapability {
    /// Capability for a build with rubberband.
    pub fn rubberband() -> Self {
        Self {
            pitch_preserving: true,
        }
    }

    /// Capability for a build limited to atempo.
    pub fn atempo() -> Self {
        Self {
            pitch_preserving: false,
        }
    }

    /// Detect the available stretch filter by listing FFmpeg filters.
    ///
    /// Call once at startup; a failed detection degrades to the
    /// atempo fallback.
    pub async fn detect() -> Self {
        let output = Command::new("ffmpeg")
            .args(["-hide_banner", "-filters"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await;

        let pitch_preserving = match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
                .lines()
                .any(|line| line.contains("rubberband")),
            _ => {
                warn!("Could not list FFmpeg filters, assuming atempo fallback");
                false
            }
        };

        let capability = Self { pitch_preserving };
        info!(
            filter = capability.filter_label(),
            max_stretch = capability.ceiling(),
            "Detected stretch capability"
        );
        capability
    }

    /// Maximum stretch factor safe for this algorithm.
    pub fn ceiling(&self) -> f64 {
        if self.pitch_preserving {
            MAX_RUBBERBAND_STRETCH
        } else {
            MAX_ATEMPO_FALLBACK
        }
    }

    /// Human-readable filter name for logging.
    pub fn filter_label(&self) -> &'static str {
        if self.pitch_preserving {
            "rubberband (pitch-preserving)"
        } else {
            "atempo (fallback)"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceilings() {
        assert_eq!(StretchCapability::rubberband().ceiling(), 1.3);
        assert_eq!(StretchCapability::atempo().ceiling(), 2.0);
    }
}
