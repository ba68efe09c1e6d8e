//! FFmpeg audio filter definitions.
//!
//! These filter strings match the historical behavior exactly.

use crate::capability::StretchCapability;
use crate::config::FADE_DURATION;

/// Pad with trailing silence until the output is exactly `target` long.
pub fn filter_pad(target: f64) -> String {
    format!("apad=whole_dur={}", target)
}

/// Time-stretch by `factor` using whichever algorithm is available.
pub fn filter_stretch(capability: StretchCapability, factor: f64) -> String {
    if capability.pitch_preserving {
        format!("rubberband=tempo={}:pitch=1.0", factor)
    } else {
        format!("atempo={}", factor)
    }
}

/// Fade out over the last [`FADE_DURATION`] seconds of a clip trimmed
/// to `target`, instead of a hard cut.
pub fn filter_fade_out(target: f64) -> String {
    let fade_start = (target - FADE_DURATION).max(0.0);
    format!("afade=t=out:st={}:d={}", fade_start, FADE_DURATION)
}

/// Lavfi silence source at the given sample format.
pub fn silence_source(sample_rate: u32, channels: u32) -> String {
    let layout = match channels {
        1 => "mono",
        _ => "stereo",
    };
    format!("anullsrc=r={}:cl={}", sample_rate, layout)
}

/// Subtitle burn-in filter with the fixed caption style.
pub fn filter_subtitles(subtitle_path: &str) -> String {
    format!(
        "subtitles={}:force_style='FontSize=24,PrimaryColour=&HFFFFFF,\
         OutlineColour=&H000000,Outline=2,MarginV=30'",
        subtitle_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_filter() {
        assert_eq!(filter_pad(4.0), "apad=whole_dur=4");
        assert_eq!(filter_pad(2.5), "apad=whole_dur=2.5");
    }

    #[test]
    fn test_stretch_filter_by_capability() {
        assert_eq!(
            filter_stretch(StretchCapability::rubberband(), 1.3),
            "rubberband=tempo=1.3:pitch=1.0"
        );
        assert_eq!(filter_stretch(StretchCapability::atempo(), 1.5), "atempo=1.5");
    }

    #[test]
    fn test_fade_filter_start() {
        assert_eq!(filter_fade_out(4.0), "afade=t=out:st=3.85:d=0.15");
    }

    #[test]
    fn test_fade_filter_clamps_at_zero() {
        // Target shorter than the fade window: fade from the start
        assert_eq!(filter_fade_out(0.1), "afade=t=out:st=0:d=0.15");
    }

    #[test]
    fn test_silence_source_layouts() {
        assert_eq!(silence_source(44100, 2), "anullsrc=r=44100:cl=stereo");
        assert_eq!(silence_source(22050, 1), "anullsrc=r=22050:cl=mono");
    }

    #[test]
    fn test_subtitles_filter_style() {
        let f = filter_subtitles("subs.srt");
        assert!(f.starts_with("subtitles=subs.srt:force_style="));
        assert!(f.contains("FontSize=24"));
        assert!(f.contains("MarginV=30"));
    }
}
