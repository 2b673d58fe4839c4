//! The request handler: one job in, one result out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use vgen_diffusion::VideoDiffusion;
use vgen_media::{decode_image, encode_video_data_uri, export_frames_to_video, normalize_image};
use vgen_models::{EncodingConfig, GenerationOutput, GenerationParams, Job, JobResult};

use crate::error::WorkerResult;

/// Handles one generation job end to end.
///
/// The pipeline is linear: extract input, decode and normalize the image,
/// derive the frame count, invoke the diffusion capability, export to MP4,
/// assemble the result. A single failure boundary wraps everything after
/// input validation; `handle` itself never returns an error.
pub struct RequestHandler<D> {
    diffusion: Arc<D>,
    encoding: EncodingConfig,
}

impl<D: VideoDiffusion> RequestHandler<D> {
    /// Create a handler around a pre-initialized capability instance.
    pub fn new(diffusion: Arc<D>) -> Self {
        Self {
            diffusion,
            encoding: EncodingConfig::default(),
        }
    }

    /// Override the encoding configuration.
    pub fn with_encoding(mut self, encoding: EncodingConfig) -> Self {
        self.encoding = encoding;
        self
    }

    /// Process a job and return a well-formed result.
    ///
    /// Always returns exactly one of an output or an error; every internal
    /// failure is flattened into the error message the runtime relays to
    /// the caller.
    pub async fn handle(&self, job: &Job) -> JobResult {
        if !job.input.has_image() {
            warn!(job_id = %job.id, "Rejecting job without image payload");
            return JobResult::error("No image provided");
        }

        match self.generate(job).await {
            Ok(output) => {
                info!(
                    job_id = %job.id,
                    frames = output.frames_generated,
                    "Job completed"
                );
                JobResult::Output(output)
            }
            Err(e) => {
                warn!(job_id = %job.id, "Job failed: {e}");
                JobResult::error(format!("Video generation failed: {e}"))
            }
        }
    }

    /// The fallible part of the pipeline, wrapped by the failure boundary
    /// in [`handle`](Self::handle).
    async fn generate(&self, job: &Job) -> WorkerResult<GenerationOutput> {
        let input = &job.input;

        if !input.prompt.is_empty() {
            // Accepted for forward compatibility; the backend has no text
            // conditioning, so the prompt is not forwarded.
            debug!(job_id = %job.id, "Ignoring prompt: backend has no text conditioning");
        }

        let image = decode_image(input.image.as_deref().unwrap_or_default())?;
        let image = normalize_image(&image);

        let params = GenerationParams::from_input(input);
        debug!(
            job_id = %job.id,
            num_frames = params.num_frames,
            seed = params.seed,
            "Invoking generation"
        );

        let frames = self.diffusion.generate(&image, &params).await?;
        let video = export_frames_to_video(&frames, input.fps, &self.encoding).await?;

        Ok(GenerationOutput {
            video_url: encode_video_data_uri(&video),
            frames_generated: params.num_frames,
            duration: input.duration,
            fps: input.fps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use image::{Rgb, RgbImage};

    use vgen_diffusion::{DiffusionError, DiffusionResult};
    use vgen_media::{check_ffmpeg, encode_image_png, FrameSequence};
    use vgen_models::GenerationInput;

    /// Capability stub that records invocations and produces frames
    /// deterministically from the seed.
    struct StubDiffusion {
        calls: Mutex<Vec<GenerationParams>>,
        fail_with: Option<String>,
    }

    impl StubDiffusion {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }

        fn recorded(&self) -> Vec<GenerationParams> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoDiffusion for StubDiffusion {
        async fn generate(
            &self,
            _image: &RgbImage,
            params: &GenerationParams,
        ) -> DiffusionResult<FrameSequence> {
            self.calls.lock().unwrap().push(params.clone());

            if let Some(message) = &self.fail_with {
                return Err(DiffusionError::GenerationFailed(message.clone()));
            }

            let shade = (params.seed % 256) as u8;
            Ok((0..params.num_frames)
                .map(|i| RgbImage::from_pixel(16, 16, Rgb([shade, i as u8, 0])))
                .collect())
        }
    }

    fn job_with_image() -> Job {
        let payload = encode_image_png(&RgbImage::new(32, 32)).unwrap();
        Job::new(GenerationInput::with_image(payload))
    }

    #[tokio::test]
    async fn missing_image_fails_without_invoking_capability() {
        let stub = Arc::new(StubDiffusion::new());
        let handler = RequestHandler::new(Arc::clone(&stub));

        let result = handler.handle(&Job::new(GenerationInput::default())).await;

        assert_eq!(result.error_message(), Some("No image provided"));
        assert!(stub.recorded().is_empty());
    }

    #[tokio::test]
    async fn empty_image_string_counts_as_missing() {
        let stub = Arc::new(StubDiffusion::new());
        let handler = RequestHandler::new(Arc::clone(&stub));

        let result = handler
            .handle(&Job::new(GenerationInput::with_image("")))
            .await;

        assert_eq!(result.error_message(), Some("No image provided"));
        assert!(stub.recorded().is_empty());
    }

    #[tokio::test]
    async fn corrupt_image_payload_hits_the_failure_boundary() {
        let stub = Arc::new(StubDiffusion::new());
        let handler = RequestHandler::new(Arc::clone(&stub));

        let result = handler
            .handle(&Job::new(GenerationInput::with_image("@@not-base64@@")))
            .await;

        let message = result.error_message().expect("failure result");
        assert!(message.starts_with("Video generation failed:"));
        assert!(stub.recorded().is_empty());
    }

    #[tokio::test]
    async fn generation_failure_is_reported_with_backend_message() {
        let stub = Arc::new(StubDiffusion::failing("CUDA out of memory"));
        let handler = RequestHandler::new(Arc::clone(&stub));

        let result = handler.handle(&job_with_image()).await;

        let message = result.error_message().expect("failure result");
        assert!(message.starts_with("Video generation failed:"));
        assert!(message.contains("CUDA out of memory"));
        assert!(result.output().is_none());
    }

    #[tokio::test]
    async fn capability_receives_the_capped_frame_count() {
        let stub = Arc::new(StubDiffusion::failing("stop before export"));
        let handler = RequestHandler::new(Arc::clone(&stub));

        // 10s x 8fps requests 80 frames; the model ceiling is 25
        let payload = encode_image_png(&RgbImage::new(32, 32)).unwrap();
        let job = Job::new(GenerationInput::with_image(payload).with_timing(10.0, 8));
        handler.handle(&job).await;

        let calls = stub.recorded();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].num_frames, 25);
        assert_eq!(calls[0].motion_bucket_id, 127);
        assert_eq!(calls[0].decode_chunk_size, 7);
    }

    // The remaining tests exercise the full success path, which shells out
    // to FFmpeg for the MP4 export.
    fn ffmpeg_available() -> bool {
        if check_ffmpeg().is_err() {
            eprintln!("ffmpeg not found in PATH, skipping export test");
            return false;
        }
        true
    }

    #[tokio::test]
    async fn success_output_echoes_inputs_and_frame_count() {
        if !ffmpeg_available() {
            return;
        }

        let stub = Arc::new(StubDiffusion::new());
        let handler = RequestHandler::new(Arc::clone(&stub));

        let payload = encode_image_png(&RgbImage::new(32, 32)).unwrap();
        let job = Job::new(GenerationInput::with_image(payload).with_timing(2.0, 6));
        let result = handler.handle(&job).await;

        assert!(result.error_message().is_none());
        let output = result.output().expect("success result");
        assert_eq!(output.frames_generated, 12);
        assert_eq!(output.duration, 2.0);
        assert_eq!(output.fps, 6);
        assert!(output.video_url.starts_with("data:video/mp4;base64,"));
    }

    #[tokio::test]
    async fn identical_jobs_produce_identical_videos() {
        if !ffmpeg_available() {
            return;
        }

        let stub = Arc::new(StubDiffusion::new());
        let handler = RequestHandler::new(Arc::clone(&stub));

        let payload = encode_image_png(&RgbImage::new(32, 32)).unwrap();
        let input = GenerationInput::with_image(payload)
            .with_seed(1234)
            .with_timing(1.0, 4);

        let first = handler.handle(&Job::new(input.clone())).await;
        let second = handler.handle(&Job::new(input)).await;

        let calls = stub.recorded();
        assert_eq!(calls[0], calls[1]);
        assert_eq!(
            first.output().expect("first result").video_url,
            second.output().expect("second result").video_url
        );
    }
}
