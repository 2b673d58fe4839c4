//! Inference service request/response types.

use serde::{Deserialize, Serialize};

use vgen_models::GenerationParams;

/// Request for frame generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Input image as base64 PNG
    pub image: String,
    /// Input image width
    pub width: u32,
    /// Input image height
    pub height: u32,
    /// Number of frames to generate
    pub num_frames: u32,
    /// Generator seed
    pub seed: u64,
    /// Motion strength
    pub motion_bucket_id: u32,
    /// Noise augmentation strength
    pub noise_aug_strength: f64,
    /// Decode chunk size
    pub decode_chunk_size: u32,
}

impl GenerateRequest {
    /// Build a request from an encoded image and normalized parameters.
    pub fn new(image: String, width: u32, height: u32, params: &GenerationParams) -> Self {
        Self {
            image,
            width,
            height,
            num_frames: params.num_frames,
            seed: params.seed,
            motion_bucket_id: params.motion_bucket_id,
            noise_aug_strength: params.noise_aug_strength,
            decode_chunk_size: params.decode_chunk_size,
        }
    }
}

/// Response from frame generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated frames, each a base64 PNG, in playback order
    pub frames: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
}
