//! Diffusion client error types.

use thiserror::Error;

pub type DiffusionResult<T> = Result<T, DiffusionError>;

#[derive(Debug, Error)]
pub enum DiffusionError {
    #[error("Inference service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Expected {expected} frames, backend returned {actual}")]
    FrameCountMismatch { expected: u32, actual: u32 },

    #[error("Frame decode failed: {0}")]
    FrameDecode(#[from] vgen_media::MediaError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiffusionError {
    /// Transport-level failures worth retrying; generation failures and
    /// malformed responses are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DiffusionError::ServiceUnavailable(_) | DiffusionError::Network(_)
        )
    }
}
