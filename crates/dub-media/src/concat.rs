//! Joining ordered chunks into one continuous track.
//!
//! Silence chunks carry only a duration; they are materialized here,
//! at the shared sample format, just before the concat demuxer joins
//! everything in order.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use dub_models::{chunk, TimelineChunk};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::config::ComposeConfig;
use crate::error::{MediaError, MediaResult};
use crate::filters::silence_source;

/// Tolerance for the debug total-duration assertion, seconds. The
/// media tooling itself is only sample-accurate.
const DURATION_TOLERANCE: f64 = 0.010;

/// Generate a silence filler file at the configured sample format.
pub async fn create_silence(
    duration: f64,
    output: &Path,
    config: &ComposeConfig,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    let cmd = FfmpegCommand::from_source(output)
        .input_args([
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            silence_source(config.sample_rate, config.channels),
        ])
        .duration(duration);
    runner.run(&cmd).await
}

/// Join chunks strictly in order into `output`.
///
/// Total-duration correctness is the timeline builder's guarantee;
/// debug builds assert it here.
pub async fn concatenate_chunks(
    chunks: &[TimelineChunk],
    expected_duration: f64,
    scratch_dir: &Path,
    output: &Path,
    config: &ComposeConfig,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    if chunks.is_empty() {
        return Err(MediaError::internal("No chunks to concatenate"));
    }

    debug_assert!(
        (chunk::total_duration(chunks) - expected_duration).abs() < DURATION_TOLERANCE,
        "chunk durations sum to {} but expected {}",
        chunk::total_duration(chunks),
        expected_duration
    );

    info!(chunks = chunks.len(), "Concatenating audio chunks");

    let mut files: Vec<PathBuf> = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        match chunk {
            TimelineChunk::Silence { duration } => {
                let path = scratch_dir.join(format!("silence_{:04}.wav", i));
                debug!("Rendering silence filler: {:.2}s", duration);
                create_silence(*duration, &path, config, runner).await?;
                files.push(path);
            }
            TimelineChunk::AdjustedAudio { path, .. } => files.push(path.clone()),
        }
    }

    let list_path = scratch_dir.join("concat.txt");
    let list_content: String = files
        .iter()
        .map(|p| format!("file '{}'\n", p.display()))
        .collect();
    tokio::fs::write(&list_path, &list_content).await?;

    let cmd = FfmpegCommand::new(&list_path, output)
        .input_args(["-f", "concat", "-safe", "0"])
        .sample_format(config.sample_rate, config.channels);
    runner.run(&cmd).await?;

    debug!(output = %output.display(), "Concat complete");
    Ok(())
}
