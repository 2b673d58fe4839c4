//! Normalized generation request parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::GenerationInput;

/// Required model input width
pub const INPUT_WIDTH: u32 = 1024;
/// Required model input height
pub const INPUT_HEIGHT: u32 = 576;

/// Maximum frames the capability can produce per invocation.
///
/// This is a hard ceiling of the underlying model, not a configurable cap;
/// requests asking for more are clamped, never rejected.
pub const MAX_FRAMES: u32 = 25;

/// Derive the frame count from requested duration and frame rate.
///
/// `min(floor(duration * fps), MAX_FRAMES)`.
pub fn derive_frame_count(duration: f64, fps: u32) -> u32 {
    let requested = (duration * fps as f64).floor().max(0.0) as u32;
    requested.min(MAX_FRAMES)
}

/// Parameters handed to the generation capability alongside the
/// normalized image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationParams {
    /// Generator seed; identical seed and image must reproduce
    /// identical frames
    pub seed: u64,
    /// Number of frames to generate (already clamped to [`MAX_FRAMES`])
    pub num_frames: u32,
    /// Motion strength
    pub motion_bucket_id: u32,
    /// Noise augmentation strength
    pub noise_aug_strength: f64,
    /// Decode chunk size
    pub decode_chunk_size: u32,
}

impl GenerationParams {
    /// Build normalized parameters from raw input.
    pub fn from_input(input: &GenerationInput) -> Self {
        Self {
            seed: input.seed,
            num_frames: derive_frame_count(input.duration, input.fps),
            motion_bucket_id: input.motion_bucket_id,
            noise_aug_strength: input.cond_aug,
            decode_chunk_size: input.decoding_t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_count_is_capped_at_ceiling() {
        // 10s x 8fps = 80 frames requested, clamped to the model ceiling
        assert_eq!(derive_frame_count(10.0, 8), 25);
    }

    #[test]
    fn frame_count_below_ceiling_is_exact() {
        assert_eq!(derive_frame_count(1.0, 4), 4);
        assert_eq!(derive_frame_count(3.0, 8), 24);
    }

    #[test]
    fn frame_count_floors_fractional_products() {
        assert_eq!(derive_frame_count(0.9, 8), 7);
        assert_eq!(derive_frame_count(0.0, 8), 0);
    }

    #[test]
    fn params_from_input_use_derived_count() {
        let input = GenerationInput::with_image("abc").with_timing(10.0, 8);
        let params = GenerationParams::from_input(&input);

        assert_eq!(params.num_frames, 25);
        assert_eq!(params.seed, 42);
        assert_eq!(params.motion_bucket_id, 127);
        assert_eq!(params.decode_chunk_size, 7);
    }
}
