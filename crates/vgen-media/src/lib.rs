//! Image decoding and FFmpeg-based video export.
//!
//! This crate provides:
//! - Base64 / data-URI image decoding and normalization to the model
//!   input resolution
//! - Type-safe FFmpeg command building
//! - Frame-sequence export to MP4 inside a scoped temporary directory

pub mod command;
pub mod decode;
pub mod error;
pub mod export;

/// Ordered sequence of RGB frames produced by the generation capability.
pub type FrameSequence = Vec<image::RgbImage>;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use decode::{decode_image, encode_image_png, normalize_image};
pub use error::{MediaError, MediaResult};
pub use export::{encode_video_data_uri, export_frames_to_video, VIDEO_DATA_URI_PREFIX};
