//! Raw generation input as delivered in a job's `input` mapping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default clip duration in seconds
pub const DEFAULT_DURATION: f64 = 10.0;
/// Default generator seed
pub const DEFAULT_SEED: u64 = 42;
/// Default output frame rate
pub const DEFAULT_FPS: u32 = 8;
/// Default motion strength
pub const DEFAULT_MOTION_BUCKET_ID: u32 = 127;
/// Default noise augmentation strength
pub const DEFAULT_COND_AUG: f64 = 0.02;
/// Default decode chunk size
pub const DEFAULT_DECODING_T: u32 = 7;

/// Generation parameters as submitted by the caller.
///
/// Every field except `image` is optional and falls back to the documented
/// default. The image is a raw base64 string or a `data:` URI.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerationInput {
    /// Source image, base64 or data URI (required)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Text prompt. Accepted but not forwarded to the backend, which has
    /// no text conditioning.
    #[serde(default)]
    pub prompt: String,

    /// Requested clip duration in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Generator seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Motion strength passed to the model
    #[serde(default = "default_motion_bucket_id")]
    pub motion_bucket_id: u32,

    /// Noise augmentation strength passed to the model
    #[serde(default = "default_cond_aug")]
    pub cond_aug: f64,

    /// Decode chunk size passed to the model
    #[serde(default = "default_decoding_t")]
    pub decoding_t: u32,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_fps() -> u32 {
    DEFAULT_FPS
}
fn default_motion_bucket_id() -> u32 {
    DEFAULT_MOTION_BUCKET_ID
}
fn default_cond_aug() -> f64 {
    DEFAULT_COND_AUG
}
fn default_decoding_t() -> u32 {
    DEFAULT_DECODING_T
}

impl Default for GenerationInput {
    fn default() -> Self {
        Self {
            image: None,
            prompt: String::new(),
            duration: DEFAULT_DURATION,
            seed: DEFAULT_SEED,
            fps: DEFAULT_FPS,
            motion_bucket_id: DEFAULT_MOTION_BUCKET_ID,
            cond_aug: DEFAULT_COND_AUG,
            decoding_t: DEFAULT_DECODING_T,
        }
    }
}

impl GenerationInput {
    /// Create an input with the given image and all defaults.
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            ..Default::default()
        }
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set duration and frame rate.
    pub fn with_timing(mut self, duration: f64, fps: u32) -> Self {
        self.duration = duration;
        self.fps = fps;
        self
    }

    /// True when an image payload is present and non-empty.
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gets_documented_defaults() {
        let input: GenerationInput = serde_json::from_str("{}").expect("deserialize input");

        assert!(input.image.is_none());
        assert_eq!(input.prompt, "");
        assert_eq!(input.duration, 10.0);
        assert_eq!(input.seed, 42);
        assert_eq!(input.fps, 8);
        assert_eq!(input.motion_bucket_id, 127);
        assert_eq!(input.cond_aug, 0.02);
        assert_eq!(input.decoding_t, 7);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let json = r#"{"image": "abc", "duration": 2, "fps": 12, "seed": 7}"#;
        let input: GenerationInput = serde_json::from_str(json).expect("deserialize input");

        assert_eq!(input.duration, 2.0);
        assert_eq!(input.fps, 12);
        assert_eq!(input.seed, 7);
        // Untouched fields still default
        assert_eq!(input.motion_bucket_id, 127);
    }

    #[test]
    fn has_image_rejects_empty_string() {
        assert!(!GenerationInput::default().has_image());
        assert!(!GenerationInput::with_image("").has_image());
        assert!(GenerationInput::with_image("aGVsbG8=").has_image());
    }
}
