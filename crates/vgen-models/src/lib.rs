//! Shared data models for the vgen backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job envelopes delivered by the queue runtime
//! - Raw generation input and the normalized generation request
//! - Success/failure result shapes returned to the runtime
//! - Video encoding configuration

pub mod encoding;
pub mod input;
pub mod job;
pub mod request;
pub mod result;

// Re-export common types
pub use encoding::EncodingConfig;
pub use input::GenerationInput;
pub use job::{Job, JobId};
pub use request::{derive_frame_count, GenerationParams, INPUT_HEIGHT, INPUT_WIDTH, MAX_FRAMES};
pub use result::{GenerationOutput, JobResult};
