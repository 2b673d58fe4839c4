//! Frame-sequence export to an in-memory MP4.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tempfile::TempDir;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::FrameSequence;
use vgen_models::EncodingConfig;

/// Data-URI prefix for inline MP4 payloads.
pub const VIDEO_DATA_URI_PREFIX: &str = "data:video/mp4;base64,";

/// Filename pattern for staged frames, as an FFmpeg input pattern.
const FRAME_PATTERN: &str = "frame_%05d.png";

/// Export a frame sequence to an MP4 container and return its bytes.
///
/// Frames are staged as PNGs in a temporary directory that also holds the
/// output file; the directory is removed when the guard drops, on success
/// and on every failure path alike.
pub async fn export_frames_to_video(
    frames: &FrameSequence,
    fps: u32,
    config: &EncodingConfig,
) -> MediaResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(MediaError::EmptyFrameSequence);
    }

    let staging = TempDir::new()?;
    write_frames(staging.path(), frames)?;

    let output_path = staging.path().join("output.mp4");
    let cmd = FfmpegCommand::new(staging.path().join(FRAME_PATTERN), &output_path)
        .framerate(fps)
        .output_args(config.to_ffmpeg_args());

    FfmpegRunner::new().run(&cmd).await?;

    let bytes = tokio::fs::read(&output_path).await?;
    debug!(
        frames = frames.len(),
        fps,
        size_bytes = bytes.len(),
        "Exported frame sequence to MP4"
    );

    Ok(bytes)
}

/// Base64-encode video bytes as an inline data URI.
pub fn encode_video_data_uri(bytes: &[u8]) -> String {
    format!("{}{}", VIDEO_DATA_URI_PREFIX, BASE64.encode(bytes))
}

/// Stage frames as numbered PNGs matching [`FRAME_PATTERN`].
fn write_frames(dir: &Path, frames: &FrameSequence) -> MediaResult<()> {
    for (index, frame) in frames.iter().enumerate() {
        let path = dir.join(format!("frame_{index:05}.png"));
        frame.save(&path)?;
    }
    Ok(())
}
