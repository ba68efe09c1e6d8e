//! Muxing the composed audio track back onto the reference video.

use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::filter_subtitles;

/// Replace the video's audio with `audio`, optionally burning in
/// subtitles.
///
/// Without subtitles the video stream is copied untouched; with
/// subtitles the burn-in forces a re-encode (libx264, preset fast,
/// CRF 23). Audio is always encoded to AAC and the output is capped
/// at the shorter stream.
pub async fn mux_audio_onto_video(
    video: &Path,
    audio: &Path,
    subtitles: Option<&Path>,
    output: &Path,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    if !video.exists() {
        return Err(MediaError::FileNotFound(video.to_path_buf()));
    }
    if !audio.exists() {
        return Err(MediaError::FileNotFound(audio.to_path_buf()));
    }

    info!(
        video = %video.display(),
        subtitles = subtitles.is_some(),
        "Merging composed audio with video"
    );

    let mut cmd = FfmpegCommand::new(video, output).add_input(audio);

    cmd = match subtitles {
        Some(subs) => cmd
            .video_filter(filter_subtitles(&subs.to_string_lossy()))
            .video_codec("libx264")
            .output_args(["-preset", "fast", "-crf", "23"]),
        None => cmd.video_codec("copy"),
    };

    let cmd = cmd
        .audio_codec("aac")
        .output_args(["-map", "0:v:0", "-map", "1:a:0", "-shortest"]);

    runner.run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_inputs_rejected() {
        let runner = FfmpegRunner::new();
        let err = mux_audio_onto_video(
            Path::new("/nonexistent/video.mp4"),
            Path::new("/nonexistent/audio.wav"),
            None,
            Path::new("/tmp/out.mp4"),
            &runner,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[test]
    fn test_copy_args_without_subtitles() {
        let cmd = FfmpegCommand::new("v.mp4", "out.mp4")
            .add_input("a.wav")
            .video_codec("copy")
            .audio_codec("aac")
            .output_args(["-map", "0:v:0", "-map", "1:a:0", "-shortest"]);
        let args = cmd.build_args();
        assert!(args.contains(&"copy".to_string()));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("subtitles=")));
    }
}
