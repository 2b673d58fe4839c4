//! The generation capability seam.

use async_trait::async_trait;
use image::RgbImage;

use crate::error::DiffusionResult;
use vgen_media::FrameSequence;
use vgen_models::GenerationParams;

/// An image-to-video diffusion backend.
///
/// Contract: `generate` returns exactly `params.num_frames` frames, and
/// identical `(image, params)` pairs reproduce identical frames (the seed
/// is binding). Implementations that cannot honor seed determinism do not
/// satisfy this trait.
///
/// The instance is constructed once at process start and shared read-only
/// across jobs; implementations must be safe for concurrent `generate`
/// calls or be wrapped in external admission control.
#[async_trait]
pub trait VideoDiffusion: Send + Sync {
    /// Generate an ordered frame sequence from a normalized input image.
    async fn generate(
        &self,
        image: &RgbImage,
        params: &GenerationParams,
    ) -> DiffusionResult<FrameSequence>;
}
