//! Stretch planning and execution.
//!
//! The planner is a pure function of (actual, target, ceiling): the
//! same inputs always produce the same decision, and the decision is
//! never revised after the fact. The executor drives FFmpeg to carry
//! the decision out.

use std::path::Path;
use tracing::{debug, info, warn};

use dub_models::{StretchDecision, StretchMode};

use crate::capability::StretchCapability;
use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::config::{ComposeConfig, FIT_TOLERANCE};
use crate::error::MediaResult;
use crate::filters;
use crate::probe::probe_duration;

/// Decide how to fit a clip of `actual` seconds into a `target`
/// second window, given the stretch `ceiling` of the available
/// algorithm.
pub fn plan_stretch(actual: f64, target: f64, ceiling: f64) -> StretchDecision {
    // Unknown or degenerate input: normalize-only copy, no timing
    // guarantee.
    if actual <= 0.0 || target <= 0.0 {
        return StretchDecision {
            factor: 1.0,
            mode: StretchMode::None,
            final_duration: actual.max(0.0),
        };
    }

    let ratio = actual / target;

    // Already fits (within tolerance): pad out to the exact window.
    if ratio <= FIT_TOLERANCE {
        return StretchDecision {
            factor: 1.0,
            mode: StretchMode::Pad,
            final_duration: target,
        };
    }

    let factor = ratio.min(ceiling);
    let stretched = actual / factor;

    // The ceiling was insufficient: trim to the window with a fade
    // instead of a hard cut.
    if stretched > target + 1e-9 {
        StretchDecision {
            factor,
            mode: StretchMode::StretchFade,
            final_duration: target,
        }
    } else {
        StretchDecision {
            factor,
            mode: StretchMode::StretchPad,
            final_duration: stretched.min(target),
        }
    }
}

/// Result of re-timing one clip.
#[derive(Debug, Clone, Copy)]
pub struct AdjustedClip {
    /// The decision that was applied.
    pub decision: StretchDecision,
    /// Probed duration of the source clip (0.0 = unknown).
    pub actual_duration: f64,
    /// Realized duration of the output, measured where possible.
    pub final_duration: f64,
}

/// Re-time `input` to fit a `target` second window, writing the
/// adjusted clip to `output` at the configured sample format.
///
/// Intermediate stretch artifacts go into `scratch_dir`. Any FFmpeg
/// failure is fatal for the composition; there are no retries.
pub async fn apply_stretch(
    input: &Path,
    target: f64,
    capability: StretchCapability,
    config: &ComposeConfig,
    scratch_dir: &Path,
    output: &Path,
) -> MediaResult<AdjustedClip> {
    let actual = probe_duration(input).await;
    let decision = plan_stretch(actual, target, capability.ceiling());
    let runner = FfmpegRunner::new().with_timeout_opt(config.transform_timeout_secs);

    match decision.mode {
        StretchMode::None => {
            debug!(
                input = %input.display(),
                actual,
                target,
                "Duration unknown or degenerate, normalizing without timing guarantee"
            );
            let cmd = FfmpegCommand::new(input, output)
                .sample_format(config.sample_rate, config.channels);
            runner.run(&cmd).await?;

            Ok(AdjustedClip {
                decision,
                actual_duration: actual,
                final_duration: decision.final_duration,
            })
        }

        StretchMode::Pad => {
            let cmd = FfmpegCommand::new(input, output)
                .audio_filter(filters::filter_pad(target))
                .duration(target)
                .sample_format(config.sample_rate, config.channels);
            runner.run(&cmd).await?;

            info!(
                "Duration OK: {:.2}s fits in {:.2}s",
                actual, target
            );
            Ok(AdjustedClip {
                decision,
                actual_duration: actual,
                final_duration: target,
            })
        }

        StretchMode::StretchPad | StretchMode::StretchFade => {
            let ratio = actual / target;
            info!(
                "Original: {:.2}s -> Target: {:.2}s (ratio: {:.2})",
                actual, target, ratio
            );
            info!(
                "Applying {}: {:.2}x",
                capability.filter_label(),
                decision.factor
            );

            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "clip".to_string());
            let stretched_path = scratch_dir.join(format!("{}_stretched.wav", stem));

            let stretch_cmd = FfmpegCommand::new(input, &stretched_path)
                .audio_filter(filters::filter_stretch(capability, decision.factor))
                .sample_format(config.sample_rate, config.channels);
            runner.run(&stretch_cmd).await?;

            let measured = probe_duration(&stretched_path).await;
            let predicted = actual / decision.factor;
            if measured > 0.0 && (measured - predicted).abs() > 0.1 {
                warn!(
                    "Stretched duration {:.2}s differs from predicted {:.2}s",
                    measured, predicted
                );
            }

            let finish_cmd = match decision.mode {
                StretchMode::StretchFade => {
                    info!(
                        "Applying fade-out: {:.2}s -> {:.2}s",
                        if measured > 0.0 { measured } else { predicted },
                        target
                    );
                    FfmpegCommand::new(&stretched_path, output)
                        .duration(target)
                        .audio_filter(filters::filter_fade_out(target))
                        .sample_format(config.sample_rate, config.channels)
                }
                _ => FfmpegCommand::new(&stretched_path, output)
                    .audio_filter(filters::filter_pad(target))
                    .duration(target)
                    .sample_format(config.sample_rate, config.channels),
            };
            runner.run(&finish_cmd).await?;

            if let Err(e) = tokio::fs::remove_file(&stretched_path).await {
                warn!(
                    path = %stretched_path.display(),
                    error = %e,
                    "Failed to remove intermediate stretch file"
                );
            }

            let final_duration = if measured > 0.0 {
                measured.min(target)
            } else {
                decision.final_duration
            };

            Ok(AdjustedClip {
                decision,
                actual_duration: actual,
                final_duration,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_within_tolerance_pads() {
        // Exactly at the tolerance boundary
        let d = plan_stretch(4.2, 4.0, 1.3);
        assert_eq!(d.mode, StretchMode::Pad);
        assert_eq!(d.factor, 1.0);
        assert_eq!(d.final_duration, 4.0);

        let d = plan_stretch(3.0, 4.0, 1.3);
        assert_eq!(d.mode, StretchMode::Pad);
    }

    #[test]
    fn test_factor_is_min_of_ratio_and_ceiling() {
        // ratio 1.2 within a 1.3 ceiling
        let d = plan_stretch(4.8, 4.0, 1.3);
        assert_eq!(d.mode, StretchMode::StretchPad);
        assert!((d.factor - 1.2).abs() < 1e-9);
        assert!((d.final_duration - 4.0).abs() < 1e-9);

        // ratio 2.5 clamped to the ceiling
        let d = plan_stretch(10.0, 4.0, 1.3);
        assert!((d.factor - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_ceiling_insufficient_fades() {
        // ratio 2.5, ceiling 1.3: stretched 10/1.3 = 7.69s > 4s
        let d = plan_stretch(10.0, 4.0, 1.3);
        assert_eq!(d.mode, StretchMode::StretchFade);
        assert!((d.factor - 1.3).abs() < 1e-9);
        assert_eq!(d.final_duration, 4.0);
    }

    #[test]
    fn test_larger_ceiling_reaches_target() {
        // Same ratio with the atempo ceiling lands on the target
        let d = plan_stretch(8.0, 4.0, 2.0);
        assert_eq!(d.mode, StretchMode::StretchPad);
        assert!((d.factor - 2.0).abs() < 1e-9);
        assert!((d.final_duration - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_duration_is_none() {
        let d = plan_stretch(0.0, 4.0, 1.3);
        assert_eq!(d.mode, StretchMode::None);
        assert_eq!(d.factor, 1.0);

        let d = plan_stretch(3.0, 0.0, 1.3);
        assert_eq!(d.mode, StretchMode::None);
    }

    #[test]
    fn test_final_never_exceeds_target() {
        for (actual, target, ceiling) in [
            (10.0, 4.0, 1.3),
            (4.8, 4.0, 1.3),
            (3.0, 4.0, 1.3),
            (8.0, 4.0, 2.0),
            (100.0, 1.0, 2.0),
        ] {
            let d = plan_stretch(actual, target, ceiling);
            assert!(d.final_duration <= target + 1e-9);
            assert!(d.factor <= ceiling);
            if matches!(d.mode, StretchMode::Pad | StretchMode::StretchPad) {
                assert!((d.final_duration - target).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_plan_is_idempotent() {
        let a = plan_stretch(7.3, 4.1, 1.3);
        let b = plan_stretch(7.3, 4.1, 1.3);
        assert_eq!(a, b);
    }
}
