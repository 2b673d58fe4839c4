//! Result shapes returned to the queue runtime.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Successful generation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationOutput {
    /// Inline `data:video/mp4;base64,` URI carrying the encoded video.
    ///
    /// The name is intentional: the payload is self-contained rather than
    /// a network-fetchable URL.
    pub video_url: String,

    /// Number of frames actually generated
    pub frames_generated: u32,

    /// Requested duration in seconds, echoed back
    pub duration: f64,

    /// Requested frame rate, echoed back
    pub fps: u32,
}

/// Result of one job: exactly one of `output` or `error`.
///
/// The externally tagged representation guarantees the xor shape on the
/// wire: `{"output": {...}}` or `{"error": "..."}`, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobResult {
    /// Job succeeded
    Output(GenerationOutput),
    /// Job failed; the message is the only diagnostic the runtime sees
    Error(String),
}

impl JobResult {
    /// Build a failure result.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    /// True if this is a failure result.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The output, if the job succeeded.
    pub fn output(&self) -> Option<&GenerationOutput> {
        match self {
            Self::Output(out) => Some(out),
            Self::Error(_) => None,
        }
    }

    /// The error message, if the job failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Output(_) => None,
            Self::Error(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &serde_json::Value) -> Vec<String> {
        value
            .as_object()
            .expect("result must be an object")
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn success_serializes_with_only_output_key() {
        let result = JobResult::Output(GenerationOutput {
            video_url: "data:video/mp4;base64,AAAA".to_string(),
            frames_generated: 25,
            duration: 10.0,
            fps: 8,
        });

        let value = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(keys(&value), vec!["output"]);
        assert_eq!(value["output"]["frames_generated"], 25);
    }

    #[test]
    fn failure_serializes_with_only_error_key() {
        let result = JobResult::error("No image provided");

        let value = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(keys(&value), vec!["error"]);
        assert_eq!(value["error"], "No image provided");
    }

    #[test]
    fn result_roundtrips_through_json() {
        let result = JobResult::error("Video generation failed: boom");
        let json = serde_json::to_string(&result).expect("serialize");
        let decoded: JobResult = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(decoded, result);
    }
}
