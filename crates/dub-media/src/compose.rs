//! Top-level composition pipeline.
//!
//! One request runs as a single sequential pipeline: validate, build
//! the timeline, concatenate, optionally mux onto the video. Any
//! transform failure aborts the whole composition; no partial
//! artifact is ever returned. Independent requests may run
//! concurrently because each gets an isolated session directory.

use std::path::PathBuf;
use tracing::info;

use dub_models::{summarize, validate_segments, ProcessingSummary, Segment, SegmentStats};

use crate::capability::StretchCapability;
use crate::command::{check_ffmpeg, check_ffprobe, FfmpegRunner};
use crate::concat::concatenate_chunks;
use crate::config::ComposeConfig;
use crate::error::{MediaError, MediaResult};
use crate::mux::mux_audio_onto_video;
use crate::session::ComposeSession;
use crate::timeline::build_timeline;

/// One composition request.
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    /// Target windows, sorted and non-overlapping.
    pub segments: Vec<Segment>,
    /// Source audio clip per segment, same order.
    pub clips: Vec<PathBuf>,
    /// Total duration of the output track in seconds.
    pub total_duration: f64,
    /// Reference video to mux the track onto. When absent the
    /// combined audio track itself is the artifact.
    pub video: Option<PathBuf>,
    /// Subtitle file to burn in during the mux.
    pub subtitles: Option<PathBuf>,
}

/// Result of a successful composition.
#[derive(Debug)]
pub struct ComposeOutput {
    /// Final artifact: muxed video, or the combined audio track when
    /// no video was supplied.
    pub artifact: PathBuf,
    /// Aggregate processing summary.
    pub summary: ProcessingSummary,
    /// Per-segment records backing the summary.
    pub stats: Vec<SegmentStats>,
}

/// Run one composition end to end.
///
/// Input shape is validated before any transform work begins. The
/// returned artifact lives outside the swept session namespace; the
/// caller owns it.
pub async fn compose(
    request: ComposeRequest,
    capability: StretchCapability,
    config: &ComposeConfig,
) -> MediaResult<ComposeOutput> {
    check_ffmpeg()?;
    check_ffprobe()?;

    validate_segments(
        &request.segments,
        request.clips.len(),
        request.total_duration,
    )?;
    for clip in &request.clips {
        if !clip.exists() {
            return Err(MediaError::FileNotFound(clip.clone()));
        }
    }
    if request.subtitles.is_some() && request.video.is_none() {
        return Err(MediaError::internal(
            "Subtitles supplied without a video to burn them into",
        ));
    }

    let mut session = ComposeSession::create(&config.work_dir).await?;
    info!(
        session = %session.id(),
        segments = request.segments.len(),
        total_duration = request.total_duration,
        filter = capability.filter_label(),
        max_stretch = capability.ceiling(),
        "Starting composition"
    );

    let (chunks, stats) = build_timeline(
        &request.segments,
        &request.clips,
        request.total_duration,
        capability,
        config,
        &session,
    )
    .await?;

    let summary = summarize(&stats);
    info!(
        total_segments = summary.total_segments,
        adjusted = summary.adjusted_count,
        total_original = format!("{:.2}s", summary.total_original),
        total_final = format!("{:.2}s", summary.total_final),
        "Processing summary"
    );
    if let Some(pct) = summary.compression_pct {
        info!("Compression: {:.1}%", pct);
    }

    let combined = session.combined_audio_path();
    let runner = FfmpegRunner::new().with_timeout_opt(config.transform_timeout_secs);
    concatenate_chunks(
        &chunks,
        request.total_duration,
        session.dir(),
        &combined,
        config,
        &runner,
    )
    .await?;

    let artifact = match &request.video {
        Some(video) => {
            let output = session.output_video_path();
            mux_audio_onto_video(
                video,
                &combined,
                request.subtitles.as_deref(),
                &output,
                &runner,
            )
            .await?;
            session.detach(output)
        }
        None => session.detach(combined),
    };

    info!(session = %session.id(), artifact = %artifact.display(), "Composition complete");

    Ok(ComposeOutput {
        artifact,
        summary,
        stats,
    })
}
